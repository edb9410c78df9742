//! Goal dashboard state.
//!
//! The board owns the signed-in user's goal list. Mutations go to the API and
//! are followed by a full re-fetch; there is no partial merge of server
//! responses into the list. A toggle is applied locally first and undone if
//! the server rejects it.

use goaltrack_core::goals::{Goal, GoalTaskInput, GoalUpdate, NewGoal};
use goaltrack_core::tasks::{Task, TaskUpdate};
use log::{debug, error, warn};

use crate::api::GoalApi;
use crate::error::{ClientError, Result};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Error,
}

pub struct GoalBoard<A: GoalApi> {
    api: A,
    session: Session,
    state: LoadState,
    goals: Vec<Goal>,
    selected: Option<i32>,
    notification: Option<String>,
}

impl<A: GoalApi> GoalBoard<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            state: LoadState::Loading,
            goals: Vec::new(),
            selected: None,
            notification: None,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    /// Returns and clears the pending notification.
    pub fn take_notification(&mut self) -> Option<String> {
        self.notification.take()
    }

    pub fn selected_goal(&self) -> Option<&Goal> {
        let id = self.selected?;
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn select_goal(&mut self, goal_id: i32) -> Result<()> {
        if !self.goals.iter().any(|g| g.id == goal_id) {
            return Err(ClientError::NotFound(format!("Goal {goal_id}")));
        }
        self.selected = Some(goal_id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Replaces the whole collection with the server's view. On failure the
    /// previous goals are kept.
    pub async fn fetch_goals(&mut self) -> Result<()> {
        self.state = LoadState::Loading;
        match self.api.fetch_goals(self.session.user_id).await {
            Ok(goals) => {
                debug!("Fetched {} goals", goals.len());
                self.goals = goals;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch goals: {e}");
                self.state = LoadState::Error;
                Err(e)
            }
        }
    }

    pub async fn add_goal(
        &mut self,
        title: &str,
        description: &str,
        tasks: Vec<GoalTaskInput>,
    ) -> Result<()> {
        let draft = NewGoal {
            title: title.to_string(),
            description: description.to_string(),
            completed: None,
            tasks,
            user_id: Some(self.session.user_id),
        };
        if let Err(e) = self.api.create_goal(&draft).await {
            return Err(self.notify("Could not create goal", e));
        }
        self.fetch_goals().await
    }

    pub async fn toggle_task_status(&mut self, task_id: i32) -> Result<()> {
        let index = self
            .goals
            .iter()
            .position(|g| g.tasks.iter().any(|t| t.id == task_id))
            .ok_or_else(|| ClientError::NotFound(format!("Task {task_id}")))?;
        let snapshot = self.goals[index].clone();

        let goal = &mut self.goals[index];
        for task in goal.tasks.iter_mut().filter(|t| t.id == task_id) {
            task.status = task.status.toggled();
        }
        goal.completed = goal.derived_completed();
        let goal_id = goal.id;
        let update = full_update(goal);

        if let Err(e) = self.api.update_goal(goal_id, &update).await {
            warn!("Rolling back toggle of task {task_id}");
            self.goals[index] = snapshot;
            return Err(self.notify("Could not update task", e));
        }
        self.fetch_goals().await
    }

    /// Saves a task's name and status and patches the local copy with the
    /// server's answer.
    pub async fn update_task(&mut self, task: &Task) -> Result<()> {
        let update = TaskUpdate {
            name: Some(task.name.clone()),
            status: Some(task.status.to_string()),
        };
        let saved = match self.api.update_task(task.id, &update).await {
            Ok(saved) => saved,
            Err(e) => return Err(self.notify("Could not update task", e)),
        };
        if let Some(goal) = self.goals.iter_mut().find(|g| g.id == saved.goal_id) {
            if let Some(local) = goal.tasks.iter_mut().find(|t| t.id == saved.id) {
                *local = saved;
            }
            goal.completed = goal.derived_completed();
        }
        Ok(())
    }

    pub async fn delete_goal(&mut self, goal_id: i32) -> Result<()> {
        if let Err(e) = self.api.delete_goal(goal_id).await {
            return Err(self.notify("Could not delete goal", e));
        }
        if self.selected == Some(goal_id) {
            self.selected = None;
        }
        self.fetch_goals().await
    }

    fn notify(&mut self, what: &str, err: ClientError) -> ClientError {
        error!("{what}: {err}");
        self.notification = Some(format!("{what}: {err}"));
        err
    }
}

/// The whole goal as a PUT body: every task carries its id, so the server
/// patches rather than creates.
fn full_update(goal: &Goal) -> GoalUpdate {
    GoalUpdate {
        title: Some(goal.title.clone()),
        description: Some(goal.description.clone()),
        completed: Some(goal.completed),
        tasks: Some(
            goal.tasks
                .iter()
                .map(|t| GoalTaskInput {
                    id: Some(t.id),
                    name: Some(t.name.clone()),
                    status: Some(t.status.to_string()),
                })
                .collect(),
        ),
    }
}
