use crate::error::GoalboardError;

pub type GoalboardResult<T> = Result<T, GoalboardError>;
