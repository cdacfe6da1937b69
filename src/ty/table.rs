pub trait TableShow {
    // 表头
    fn head() -> Vec<String>;

    // 每一列的行内容
    fn cols(&self) -> Vec<(String, Vec<String>)>;

    // 表名
    fn title(&self) -> Option<String> {
        None
    }

    fn table(&self) -> String {
        let (mut table, mut col_max_size) = (String::new(), vec![]);
        let cols = self.cols();
        cols.iter().for_each(|col| {
            col_max_size.push(
                2 + col
                    .1
                    .iter()
                    .map(|s| width(s))
                    .max()
                    .unwrap_or_default()
                    .max(width(&col.0)),
            );
        });

        fn width(s: &str) -> usize {
            s.chars().count()
        }

        fn center(table: &mut String, size: usize, s: &str) {
            let pad = size.saturating_sub(width(s));
            table.extend(std::iter::repeat(' ').take(pad / 2));
            table.push_str(s);
            table.extend(std::iter::repeat(' ').take(pad - pad / 2));
        }

        fn left(table: &mut String, size: usize, s: &str) {
            table.push(' ');
            table.push_str(s);
            table.extend(std::iter::repeat(' ').take(size.saturating_sub(width(s) + 1)));
        }

        let total = col_max_size.iter().sum::<usize>() + col_max_size.len().saturating_sub(1);
        if let Some(title) = self.title() {
            center(&mut table, total, title.as_str());
            push_line(&mut table);
        }

        for (idx, (h, &size)) in cols.iter().zip(col_max_size.iter()).enumerate() {
            if idx > 0 {
                table.push('|');
            }
            center(&mut table, size, h.0.as_str());
        }
        push_line(&mut table);

        for (idx, &size) in col_max_size.iter().enumerate() {
            if idx > 0 {
                table.push('+');
            }
            table.extend(std::iter::repeat('-').take(size));
        }
        table.push('\n');

        let rows = cols.iter().map(|c| c.1.len()).max().unwrap_or_default();

        for row in 0..rows {
            for (idx, (h, &size)) in cols.iter().zip(col_max_size.iter()).enumerate() {
                if idx > 0 {
                    table.push('|');
                }
                match h.1.get(row) {
                    Some(s) => left(&mut table, size, s.as_str()),
                    None => left(&mut table, size, ""),
                }
            }
            push_line(&mut table);
        }

        table
    }
}

// 去掉行尾空格后换行
fn push_line(table: &mut String) {
    let len = table.trim_end_matches(' ').len();
    table.truncate(len);
    table.push('\n');
}

/// two column table of names and their values
#[derive(Clone, Debug, Default)]
pub struct NamedValues {
    title: Option<String>,
    rows: Vec<(String, String)>,
}

impl NamedValues {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            rows: vec![],
        }
    }

    pub fn push(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.rows.push((name.into(), value.to_string()));
        self
    }
}

impl TableShow for NamedValues {
    fn head() -> Vec<String> {
        vec!["Name".to_string(), "Value".to_string()]
    }

    fn cols(&self) -> Vec<(String, Vec<String>)> {
        let (names, values): (Vec<String>, Vec<String>) = self.rows.iter().cloned().unzip();
        Self::head().into_iter().zip([names, values]).collect()
    }

    fn title(&self) -> Option<String> {
        self.title.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{NamedValues, TableShow};

    #[test]
    fn table_layout() {
        let t = NamedValues::new("RSA")
            .push("Prime p", 17)
            .push("Public Modulus n", 391)
            .table();
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines.len(), 5, "{t}");
        assert_eq!(lines[0].trim(), "RSA");
        assert_eq!(lines[1], "       Name       | Value");
        assert_eq!(lines[2], "------------------+-------");
        assert_eq!(lines[3], " Prime p          | 17");
        assert_eq!(lines[4], " Public Modulus n | 391");
    }

    #[test]
    fn table_empty_rows() {
        let t = NamedValues::default().table();
        assert_eq!(t.lines().count(), 2);
    }
}
