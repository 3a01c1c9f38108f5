use growpod_core::views::TeardownHandle;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;

pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Tears the view down when Ctrl-C is pressed, until dropped.
pub struct CtrlCTeardown {
    task: JoinHandle<()>,
}

impl CtrlCTeardown {
    pub fn install(handle: TeardownHandle) -> Self {
        let task = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                handle.teardown();
            }
        });
        CtrlCTeardown { task }
    }
}

impl Drop for CtrlCTeardown {
    fn drop(&mut self) {
        self.task.abort();
    }
}
