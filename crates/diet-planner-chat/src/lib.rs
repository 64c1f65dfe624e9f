//! Diet Planner Chat
//!
//! Keyword-matching nutrition advisor. Replies come from an ordered table of
//! canned responses and are tailored with the user's conditions, name and
//! calorie target.
//!
//! # Modules
//!
//! - [`responses`]: Response categories, keyword patterns and JSON loading
//! - [`advisor`]: Category matching, personalization and conversation history

pub mod advisor;
pub mod responses;

pub use advisor::{meal_suggestions, Advisor, AdvisorContext, Exchange, Speaker};
pub use responses::{ResponseCategory, ResponseError, ResponseResult, ResponseTable};
