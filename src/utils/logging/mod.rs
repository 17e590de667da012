//! Logging and progress helpers
//!
//! Messages share one shape so runs over many schools read uniformly.

pub mod console;
pub mod log;
pub mod progress;

pub use self::log::{log_operation_complete, log_operation_start, log_section_failed, log_warning};
pub use self::console::{print_batch_summary, print_report_summary, print_table_summary};
pub use self::progress::{create_main_progress_bar, create_spinner, finish_progress_bar};
