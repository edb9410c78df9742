use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalChanges, GoalDraft, GoalUpdate, NewGoal};
use crate::ids::OwnerRef;
use async_trait::async_trait;

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn load_goals(&self) -> Result<Vec<Goal>>;
    fn load_goals_for_user(&self, user_id: i32) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: i32) -> Result<Goal>;
    /// Inserts the goal and all of its tasks as one unit.
    async fn insert_goal(&self, draft: GoalDraft) -> Result<Goal>;
    async fn update_goal(&self, changes: GoalChanges) -> Result<Goal>;
    /// Deletes the goal's tasks, then the goal. Returns the number of tasks removed.
    async fn delete_goal(&self, goal_id: i32) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn get_goals(&self) -> Result<Vec<Goal>>;
    fn get_goal(&self, goal_id: i32) -> Result<Goal>;
    fn get_goals_by_owner(&self, owner: &OwnerRef) -> Result<Vec<Goal>>;
    async fn create_goal(&self, new_goal: NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_id: i32, update: GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: i32) -> Result<()>;
}
