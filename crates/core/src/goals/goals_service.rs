use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::ids::OwnerRef;
use crate::users::UserRepositoryTrait;
use crate::Error;
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

pub struct GoalService {
    goal_repo: Arc<dyn GoalRepositoryTrait>,
    user_repo: Arc<dyn UserRepositoryTrait>,
}

impl GoalService {
    pub fn new(
        goal_repo: Arc<dyn GoalRepositoryTrait>,
        user_repo: Arc<dyn UserRepositoryTrait>,
    ) -> Self {
        GoalService {
            goal_repo,
            user_repo,
        }
    }

    fn resolve_owner(&self, owner: &OwnerRef) -> Result<i32> {
        match owner {
            OwnerRef::Id(user_id) => self.user_repo.get_user(*user_id).map(|u| u.id),
            OwnerRef::Username(username) => self
                .user_repo
                .find_by_username(username)?
                .map(|u| u.id)
                .ok_or_else(|| Error::not_found("User", username)),
        }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn get_goals(&self) -> Result<Vec<Goal>> {
        self.goal_repo.load_goals()
    }

    fn get_goal(&self, goal_id: i32) -> Result<Goal> {
        self.goal_repo.get_goal(goal_id)
    }

    fn get_goals_by_owner(&self, owner: &OwnerRef) -> Result<Vec<Goal>> {
        let user_id = self.resolve_owner(owner)?;
        self.goal_repo.load_goals_for_user(user_id)
    }

    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal> {
        let draft = new_goal.validate()?;
        self.resolve_owner(&OwnerRef::Id(draft.user_id))?;
        debug!(
            "Creating goal for user {} with {} task(s)",
            draft.user_id,
            draft.tasks.len()
        );
        self.goal_repo.insert_goal(draft).await
    }

    async fn update_goal(&self, goal_id: i32, update: GoalUpdate) -> Result<Goal> {
        let changes = update.validate(goal_id)?;
        debug!(
            "Updating goal {}: {} new task(s), {} patched task(s)",
            goal_id,
            changes.new_tasks.len(),
            changes.task_patches.len()
        );
        self.goal_repo.update_goal(changes).await
    }

    async fn delete_goal(&self, goal_id: i32) -> Result<()> {
        let removed_tasks = self.goal_repo.delete_goal(goal_id).await?;
        debug!("Deleted goal {} and {} task(s)", goal_id, removed_tasks);
        Ok(())
    }
}
