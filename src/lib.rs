pub mod cmd;
pub mod demo;
pub mod error;
pub mod report;
pub mod ty;

pub fn log_error<T>(x: Result<T, anyhow::Error>) -> Option<T> {
    x.map_err(|e| {
        log::error!("{e:#}");
    })
    .ok()
}
