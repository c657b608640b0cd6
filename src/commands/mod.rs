pub mod fetch;
pub mod report;
pub mod show;
pub mod summarize;

pub use fetch::run_fetch;
pub use report::StatsReport;
pub use show::run_show;
pub use summarize::run_summarize;
