//! The narrative around the key exchange: every panel of the dashboard, as plain data.
//!
//! Only the key composition, the modulus metric and the attack outcome depend on the demo
//! session, everything else is fixed storytelling.

use std::fmt::Write;
use std::str::FromStr;

use cipher::rsa::Recovery;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Serialize, Serializer};

use crate::demo::DemoSession;
use crate::error::DemoError;
use crate::ty::TableShow;

const BAR_WIDTH: usize = 30;

const FLOW: [&str; 5] = [
    "Client (Browser)",
    "RSA Public Key",
    "Encrypted Session Key",
    "Private Key",
    "AES Channel",
];

// (method, time to factor the modulus in arbitrary units)
const FACTORING: [(&str, f64); 2] = [
    ("Classical Computer", 1e9),
    ("Quantum Computer (Shor)", 1e2),
];

const DEGRADATION_PROGRESS: u8 = 75;
const DEGRADATION_CAPTION: &str =
    "Encrypted traffic recorded today becomes vulnerable once quantum capability matures";

// store now, decrypt later
const TIMELINE: [(&str, u32); 6] = [
    ("HTTPS Session", 0),
    ("Traffic Recorded", 1),
    ("Quantum Computer Exists", 4),
    ("Shor's Algorithm Executed", 5),
    ("Private Key Recovered", 6),
    ("Data Decrypted", 7),
];

const CASCADE: [(StatusLevel, &str); 3] = [
    (StatusLevel::Error, "RSA Private Key Compromised"),
    (StatusLevel::Warning, "Session Key Exposed"),
    (StatusLevel::Success, "AES Data Readable"),
];

// (property, rsa, qkd)
const COMPARISON: [(&str, u8, u8); 5] = [
    ("Future-Safe", 0, 1),
    ("Store-Now Attack Resistant", 0, 1),
    ("Relies on Math", 1, 0),
    ("Eavesdrop Detection", 0, 1),
    ("Long-Term Confidentiality", 0, 1),
];

const VERDICT: [&str; 4] = [
    "RSA enables delayed compromise under quantum adversaries",
    "AES remains secure but depends on key exchange",
    "Shor's algorithm breaks RSA retrospectively",
    "QKD removes the mathematical attack surface entirely",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Structure,
    Flow,
    Factoring,
    Metrics,
    Degradation,
    Timeline,
    Attack,
    Cascade,
    Comparison,
    Verdict,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Structure,
        Section::Flow,
        Section::Factoring,
        Section::Metrics,
        Section::Degradation,
        Section::Timeline,
        Section::Attack,
        Section::Cascade,
        Section::Comparison,
        Section::Verdict,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Structure => "structure",
            Section::Flow => "flow",
            Section::Factoring => "factoring",
            Section::Metrics => "metrics",
            Section::Degradation => "degradation",
            Section::Timeline => "timeline",
            Section::Attack => "attack",
            Section::Cascade => "cascade",
            Section::Comparison => "comparison",
            Section::Verdict => "verdict",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Section::Structure => "RSA Public Key Structure",
            Section::Flow => "HTTPS Key Exchange Flow",
            Section::Factoring => "Factoring Difficulty Comparison",
            Section::Metrics => "Cryptographic State Metrics",
            Section::Degradation => "Long-Term Security Degradation",
            Section::Timeline => "Store-Now -> Decrypt-Later Attack Timeline",
            Section::Attack => "Quantum Factorization (Simulated Shor's Algorithm)",
            Section::Cascade => "Cascading Cryptographic Failure",
            Section::Comparison => "Why QKD Stops This Attack",
            Section::Verdict => "Security Verdict",
        }
    }
}

impl FromStr for Section {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|x| x.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DemoError::UnknownSection(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Component {
    pub name: String,
    #[serde(serialize_with = "as_decimal")]
    pub value: BigUint,
}

fn as_decimal<S: Serializer>(x: &BigUint, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(x)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KeyComposition(pub Vec<Component>);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FactoringTime {
    pub method: String,
    pub time: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FactoringTimes(pub Vec<FactoringTime>);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metrics(pub Vec<Metric>);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Degradation {
    pub progress: u8,
    pub caption: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineStage {
    pub stage: String,
    pub time_index: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timeline(pub Vec<TimelineStage>);

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttackOutcome {
    pub recovered_p: String,
    pub recovered_q: String,
    pub recovered_session_key: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Error,
    Warning,
    Success,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Status {
    pub level: StatusLevel,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyScore {
    pub property: String,
    pub rsa: u8,
    pub qkd: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SecurityComparison(pub Vec<PropertyScore>);

/// everything the rendering surface shows
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dashboard {
    pub key_composition: KeyComposition,
    pub flow: Vec<String>,
    pub factoring: FactoringTimes,
    pub metrics: Metrics,
    pub degradation: Degradation,
    pub timeline: Timeline,
    pub attack: Option<AttackOutcome>,
    pub cascade: Vec<Status>,
    pub comparison: SecurityComparison,
    pub verdict: Vec<String>,
}

impl Dashboard {
    /// `recovery` is only set once the attack has been triggered
    pub fn new(session: &DemoSession, recovery: Option<&Recovery>) -> Self {
        let key = session.key();
        let key_composition = KeyComposition(vec![
            Component {
                name: "Prime p".to_string(),
                value: key.p().clone(),
            },
            Component {
                name: "Prime q".to_string(),
                value: key.q().clone(),
            },
            Component {
                name: "Public Modulus n".to_string(),
                value: key.modulus().clone(),
            },
        ]);

        let metric = |label: &str, value: String, delta: Option<&str>| Metric {
            label: label.to_string(),
            value,
            delta: delta.map(|s| s.to_string()),
        };
        let metrics = Metrics(vec![
            metric("RSA Modulus (n)", key.modulus().to_string(), None),
            metric("Key Exchange", "RSA".to_string(), None),
            metric("Quantum Threat Level", "HIGH".to_string(), Some("↑")),
            metric("Data Longevity Risk", "SEVERE".to_string(), None),
        ]);

        Self {
            key_composition,
            flow: FLOW.iter().map(|s| s.to_string()).collect(),
            factoring: FactoringTimes(
                FACTORING
                    .iter()
                    .map(|&(method, time)| FactoringTime {
                        method: method.to_string(),
                        time,
                    })
                    .collect(),
            ),
            metrics,
            degradation: Degradation {
                progress: DEGRADATION_PROGRESS,
                caption: DEGRADATION_CAPTION.to_string(),
            },
            timeline: Timeline(
                TIMELINE
                    .iter()
                    .map(|&(stage, time_index)| TimelineStage {
                        stage: stage.to_string(),
                        time_index,
                    })
                    .collect(),
            ),
            attack: recovery.map(|r| AttackOutcome {
                recovered_p: r.p.to_string(),
                recovered_q: r.q.to_string(),
                recovered_session_key: r.key.to_string(),
            }),
            cascade: CASCADE
                .iter()
                .map(|&(level, message)| Status {
                    level,
                    message: message.to_string(),
                })
                .collect(),
            comparison: SecurityComparison(
                COMPARISON
                    .iter()
                    .map(|&(property, rsa, qkd)| PropertyScore {
                        property: property.to_string(),
                        rsa,
                        qkd,
                    })
                    .collect(),
            ),
            verdict: VERDICT.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn render(&self, sections: &[Section]) -> String {
        let mut out = String::new();
        for (idx, section) in sections.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            out.push_str(&format!("== {} ==\n", section.header()));
            out.push_str(&self.render_section(*section));
        }
        out
    }

    fn render_section(&self, section: Section) -> String {
        match section {
            Section::Structure => self.key_composition.table(),
            Section::Flow => {
                let steps: Vec<String> = self.flow.iter().map(|s| format!("[{s}]")).collect();
                format!("{}\n", steps.join(" -> "))
            }
            Section::Factoring => self.factoring.table(),
            Section::Metrics => self.metrics.table(),
            Section::Degradation => {
                let d = &self.degradation;
                let fill = BAR_WIDTH * usize::from(d.progress.min(100)) / 100;
                format!(
                    "[{}{}] {}%\n{}\n",
                    "#".repeat(fill),
                    ".".repeat(BAR_WIDTH - fill),
                    d.progress,
                    d.caption
                )
            }
            Section::Timeline => self.timeline.table(),
            Section::Attack => match self.attack.as_ref() {
                Some(a) => format!(
                    "Recovered p: {}\nRecovered q: {}\nRecovered Session Key: {}\n",
                    a.recovered_p, a.recovered_q, a.recovered_session_key
                ),
                None => "attack not triggered, rerun with `--attack` to run Shor's algorithm\n"
                    .to_string(),
            },
            Section::Cascade => {
                let mut s = String::new();
                for status in self.cascade.iter() {
                    let tag = match status.level {
                        StatusLevel::Error => "ERROR",
                        StatusLevel::Warning => "WARNING",
                        StatusLevel::Success => "OK",
                    };
                    let _ = writeln!(s, "[{tag}] {}", status.message);
                }
                s
            }
            Section::Comparison => self.comparison.table(),
            Section::Verdict => self.verdict.iter().map(|v| format!("* {v}\n")).collect(),
        }
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.min(BAR_WIDTH))
}

impl TableShow for KeyComposition {
    fn head() -> Vec<String> {
        ["Component", "Value", ""].map(String::from).to_vec()
    }

    fn cols(&self) -> Vec<(String, Vec<String>)> {
        // lengths only, so a lossy float is fine
        let len = |x: &BigUint| x.to_f64().unwrap_or(f64::MAX);
        let max = self.0.iter().map(|c| len(&c.value)).fold(0.0, f64::max);
        let mut res = vec![vec![]; 3];
        for c in self.0.iter() {
            res[0].push(c.name.clone());
            res[1].push(c.value.to_string());
            res[2].push(bar(len(&c.value), max));
        }
        Self::head().into_iter().zip(res).collect()
    }

    fn title(&self) -> Option<String> {
        Some("RSA Key Composition".to_string())
    }
}

impl TableShow for FactoringTimes {
    fn head() -> Vec<String> {
        ["Method", "Time", "log10"].map(String::from).to_vec()
    }

    fn cols(&self) -> Vec<(String, Vec<String>)> {
        let max = self
            .0
            .iter()
            .map(|t| t.time.max(1.0).log10())
            .fold(0.0, f64::max);
        let mut res = vec![vec![]; 3];
        for t in self.0.iter() {
            res[0].push(t.method.clone());
            res[1].push(format!("{:e}", t.time));
            res[2].push(bar(t.time.max(1.0).log10(), max));
        }
        Self::head().into_iter().zip(res).collect()
    }

    fn title(&self) -> Option<String> {
        Some("Time to Factor RSA Modulus".to_string())
    }
}

impl TableShow for Metrics {
    fn head() -> Vec<String> {
        ["Metric", "Value", "Delta"].map(String::from).to_vec()
    }

    fn cols(&self) -> Vec<(String, Vec<String>)> {
        let mut res = vec![vec![]; 3];
        for m in self.0.iter() {
            res[0].push(m.label.clone());
            res[1].push(m.value.clone());
            res[2].push(m.delta.clone().unwrap_or_default());
        }
        Self::head().into_iter().zip(res).collect()
    }
}

impl TableShow for Timeline {
    fn head() -> Vec<String> {
        ["Stage", "Time Index", ""].map(String::from).to_vec()
    }

    fn cols(&self) -> Vec<(String, Vec<String>)> {
        let last = self.0.iter().map(|t| t.time_index).max().unwrap_or_default() as usize;
        let mut res = vec![vec![]; 3];
        for t in self.0.iter() {
            let idx = t.time_index as usize;
            res[0].push(t.stage.clone());
            res[1].push(t.time_index.to_string());
            res[2].push(format!("{}o{}", "-".repeat(idx), "-".repeat(last - idx)));
        }
        Self::head().into_iter().zip(res).collect()
    }

    fn title(&self) -> Option<String> {
        Some("Quantum Threat Timeline".to_string())
    }
}

impl TableShow for SecurityComparison {
    fn head() -> Vec<String> {
        ["Property", "RSA", "QKD"].map(String::from).to_vec()
    }

    fn cols(&self) -> Vec<(String, Vec<String>)> {
        let mark = |x: u8| if x > 0 { "yes" } else { "no" }.to_string();
        let mut res = vec![vec![]; 3];
        for p in self.0.iter() {
            res[0].push(p.property.clone());
            res[1].push(mark(p.rsa));
            res[2].push(mark(p.qkd));
        }
        Self::head().into_iter().zip(res).collect()
    }

    fn title(&self) -> Option<String> {
        Some("Security Model Comparison".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{Dashboard, Section, StatusLevel};
    use crate::demo::{DemoParams, DemoSession};
    use crate::ty::TableShow;
    use cipher::FixedRand;

    fn session() -> DemoSession {
        DemoSession::start(&DemoParams::default(), &mut FixedRand::new(50)).unwrap()
    }

    #[test]
    fn narrative_data() {
        let d = Dashboard::new(&session(), None);

        let comps: Vec<(&str, String)> = d
            .key_composition
            .0
            .iter()
            .map(|c| (c.name.as_str(), c.value.to_string()))
            .collect();
        assert_eq!(
            comps,
            vec![
                ("Prime p", "17".to_string()),
                ("Prime q", "23".to_string()),
                ("Public Modulus n", "391".to_string())
            ]
        );

        assert_eq!(d.flow.len(), 5);
        assert_eq!(d.factoring.0.len(), 2);
        assert_eq!(d.factoring.0[0].time, 1e9);
        assert_eq!(d.factoring.0[1].time, 1e2);
        assert_eq!(d.metrics.0[0].value, "391");
        assert_eq!(d.degradation.progress, 75);

        let idx: Vec<u32> = d.timeline.0.iter().map(|t| t.time_index).collect();
        assert_eq!(idx, vec![0, 1, 4, 5, 6, 7]);

        let levels: Vec<StatusLevel> = d.cascade.iter().map(|s| s.level).collect();
        assert_eq!(
            levels,
            vec![StatusLevel::Error, StatusLevel::Warning, StatusLevel::Success]
        );

        let rsa: Vec<u8> = d.comparison.0.iter().map(|p| p.rsa).collect();
        let qkd: Vec<u8> = d.comparison.0.iter().map(|p| p.qkd).collect();
        assert_eq!(rsa, vec![0, 0, 1, 0, 0]);
        assert_eq!(qkd, vec![1, 1, 0, 1, 1]);
        assert_eq!(d.verdict.len(), 4);
        assert!(d.attack.is_none());
    }

    #[test]
    fn attack_outcome() {
        let s = session();
        let rec = s.run_attack().unwrap();
        let d = Dashboard::new(&s, Some(&rec));
        let a = d.attack.as_ref().unwrap();
        assert_eq!(a.recovered_p, "17");
        assert_eq!(a.recovered_q, "23");
        assert_eq!(a.recovered_session_key, "50");

        let out = d.render(&[Section::Attack]);
        assert!(out.contains("Recovered Session Key: 50"), "{out}");
    }

    #[test]
    fn modulus_beyond_u64() {
        let params = DemoParams {
            p: 4294967311,
            q: 4294967357,
            e: 65537,
            ..Default::default()
        };
        let s = DemoSession::start(&params, &mut FixedRand::new(50)).unwrap();
        let d = Dashboard::new(&s, None);

        let n = s.key().modulus().to_string();
        assert_eq!(n, "18446744400127067027");
        assert_eq!(d.key_composition.0[2].value.to_string(), n);
        assert_eq!(d.metrics.0[0].value, n);

        let table = d.key_composition.table();
        assert!(table.contains(&n), "{table}");
        assert!(table.contains(&"#".repeat(30)), "{table}");

        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["key_composition"][2]["value"], n.as_str());
    }

    #[test]
    fn section_names() {
        for s in Section::ALL {
            assert_eq!(s.name().parse::<Section>().unwrap(), s);
        }
        assert_eq!("Timeline".parse::<Section>().unwrap(), Section::Timeline);
        assert!("radar".parse::<Section>().is_err());
    }

    #[test]
    fn render_all_sections() {
        let d = Dashboard::new(&session(), None);
        let out = d.render(&Section::ALL);
        for s in Section::ALL {
            assert!(out.contains(s.header()), "missing {}", s.name());
        }
        let progress = format!("[{}{}] 75%", "#".repeat(22), ".".repeat(8));
        assert!(out.contains(&progress), "{out}");
        assert!(out.contains("rerun with `--attack`"));

        let timeline = d.timeline.table();
        assert!(timeline.contains("----o---"), "{timeline}");
    }

    #[test]
    fn dashboard_json() {
        let d = Dashboard::new(&session(), None);
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["key_composition"][2]["value"], "391");
        assert_eq!(v["cascade"][0]["level"], "error");
        assert_eq!(v["comparison"][2]["rsa"], 1);
        assert!(v["attack"].is_null());
    }
}
