use super::ViewScope;
use super::messages::report;
use crate::api::GrowPodClient;
use crate::model::Task;

/// Which task endpoint a view reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSource {
    /// `GET /schedule`
    #[default]
    Schedule,
    /// `GET /task`
    Task,
}

pub struct TaskView {
    client: GrowPodClient,
    scope: ViewScope,
    pub task: Option<Task>,
    pub error_message: String,
}

impl TaskView {
    pub fn new(client: GrowPodClient) -> Self {
        TaskView {
            client,
            scope: ViewScope::new(),
            task: None,
            error_message: String::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub async fn load(&mut self, source: TaskSource) {
        let fetch = async {
            match source {
                TaskSource::Schedule => self.client.schedule_task().await,
                TaskSource::Task => self.client.task().await,
            }
        };
        let Some(result) = self.scope.guard(fetch).await else {
            return;
        };

        match result {
            Ok(task) => {
                self.task = Some(task);
                self.error_message.clear();
            }
            Err(e) => {
                self.task = None;
                self.error_message = report(&e, None);
            }
        }
    }
}
