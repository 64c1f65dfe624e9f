//! Keyword advisor with conversation history.

use chrono::{DateTime, Utc};
use diet_planner_core::engine::daily_calorie_target;
use diet_planner_core::models::{ConditionKey, ExtendedProfile, Profile};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::responses::{ResponseCategory, ResponseTable};

/// Reply used when the table cannot produce one.
pub const APOLOGY: &str = "I'm sorry, I'm having trouble processing your request. \
Please try asking about diet, nutrition, or meal planning.";

/// Number of exchanges returned by [`Advisor::recent_history`].
pub const RECENT_HISTORY_LEN: usize = 10;

const MEAL_PLANNING: &str = "meal_planning";

/// What the advisor knows about the person it is talking to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdvisorContext {
    pub name: Option<String>,
    pub conditions: Vec<ConditionKey>,
    pub daily_calories: Option<u32>,
}

impl AdvisorContext {
    pub fn has_condition(&self, key: ConditionKey) -> bool {
        self.conditions.contains(&key)
    }
}

impl From<&Profile> for AdvisorContext {
    /// Uses the profile's own calorie goal, or the simple engine's target.
    fn from(profile: &Profile) -> Self {
        let name = profile.name.trim();
        Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            conditions: ConditionKey::parse_list(&profile.medical_conditions),
            daily_calories: profile
                .daily_calories
                .or_else(|| u32::try_from(daily_calorie_target(profile)).ok()),
        }
    }
}

impl From<&ExtendedProfile> for AdvisorContext {
    fn from(profile: &ExtendedProfile) -> Self {
        Self {
            name: profile.name.clone(),
            conditions: profile.conditions.clone(),
            daily_calories: profile.daily_calories,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Advisor,
}

/// One side of a conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exchange {
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Exchange {
    fn now(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Answers free-text nutrition questions from a [`ResponseTable`].
#[derive(Debug, Clone, Default)]
pub struct Advisor {
    table: ResponseTable,
    history: Vec<Exchange>,
}

impl Advisor {
    pub fn new(table: ResponseTable) -> Self {
        Self {
            table,
            history: Vec::new(),
        }
    }

    pub fn table(&self) -> &ResponseTable {
        &self.table
    }

    /// Reply to a message. Never fails; unmatched text gets a default reply.
    pub fn get_response<R: Rng + ?Sized>(
        &mut self,
        message: &str,
        context: Option<&AdvisorContext>,
        rng: &mut R,
    ) -> String {
        self.history.push(Exchange::now(Speaker::User, message));

        let normalized = message.trim().to_lowercase();
        match self.compose(&normalized, context, rng) {
            Some(reply) => {
                self.history.push(Exchange::now(Speaker::Advisor, reply.as_str()));
                reply
            }
            None => {
                warn!("response table has no usable default category");
                APOLOGY.to_string()
            }
        }
    }

    fn compose<R: Rng + ?Sized>(
        &self,
        message: &str,
        context: Option<&AdvisorContext>,
        rng: &mut R,
    ) -> Option<String> {
        let (category, matched) = match self.table.best_match(message) {
            Some(category) => (category, true),
            None => (self.table.default_category()?, false),
        };
        debug!(category = %category.name, matched, "advisor category");

        let mut reply = category.responses.choose(rng)?.clone();
        if let Some(context) = context {
            if matched {
                reply.push_str(condition_suffix(category, context));
            }
            reply = personalize(reply, context);
        }
        Some(reply)
    }

    /// Every exchange so far, oldest first.
    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    /// The last ten exchanges, oldest first.
    pub fn recent_history(&self) -> &[Exchange] {
        let start = self.history.len().saturating_sub(RECENT_HISTORY_LEN);
        &self.history[start..]
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

fn condition_suffix(category: &ResponseCategory, context: &AdvisorContext) -> &'static str {
    if category.name != MEAL_PLANNING {
        return "";
    }
    if context.has_condition(ConditionKey::Diabetes) {
        " Since you have diabetes, focus on complex carbs and monitor portions."
    } else if context.has_condition(ConditionKey::HeartDisease) {
        " For heart health, emphasize omega-3 rich foods and limit sodium."
    } else if context.has_condition(ConditionKey::Hypertension) {
        " With high blood pressure, keep sodium under 1500mg daily."
    } else if context.has_condition(ConditionKey::Obesity) {
        " For weight management, focus on portion control and high-protein foods."
    } else {
        ""
    }
}

fn personalize(reply: String, context: &AdvisorContext) -> String {
    let mut reply = match context.name.as_deref() {
        Some(name) if !name.trim().is_empty() => format!("{}, {}", name, reply.to_lowercase()),
        _ => reply,
    };
    if let Some(calories) = context.daily_calories {
        if reply.to_lowercase().contains("calorie") {
            reply.push_str(&format!(
                " Based on your profile, aim for around {} calories daily.",
                calories
            ));
        }
    }
    reply
}

const BREAKFAST_SUGGESTIONS: &[&str] = &[
    "Try oatmeal with berries and nuts",
    "Greek yogurt with fruit and granola",
    "Whole grain toast with avocado and eggs",
    "Smoothie with spinach, banana, and protein powder",
];

const LUNCH_SUGGESTIONS: &[&str] = &[
    "Quinoa salad with grilled chicken and vegetables",
    "Lentil soup with whole grain bread",
    "Salmon with brown rice and steamed broccoli",
    "Turkey and vegetable wrap with hummus",
];

const DINNER_SUGGESTIONS: &[&str] = &[
    "Grilled fish with roasted vegetables",
    "Lean beef stir-fry with brown rice",
    "Chicken breast with sweet potato and green beans",
    "Tofu curry with quinoa and spinach",
];

const SNACK_SUGGESTIONS: &[&str] = &[
    "Apple slices with almond butter",
    "Greek yogurt with berries",
    "Handful of mixed nuts",
    "Hummus with vegetable sticks",
];

/// Quick meal ideas for a slot ("breakfast", "lunch", "dinner", "snack").
///
/// Unknown slots get snack ideas. Condition filtering never empties the
/// list; if every idea would be dropped the unfiltered list is returned.
pub fn meal_suggestions(slot: &str, context: Option<&AdvisorContext>) -> Vec<&'static str> {
    let base = match slot.trim().to_lowercase().as_str() {
        "breakfast" => BREAKFAST_SUGGESTIONS,
        "lunch" => LUNCH_SUGGESTIONS,
        "dinner" => DINNER_SUGGESTIONS,
        _ => SNACK_SUGGESTIONS,
    };

    let Some(context) = context else {
        return base.to_vec();
    };

    let diabetic = context.has_condition(ConditionKey::Diabetes);
    let cardiac = context.has_condition(ConditionKey::HeartDisease);
    let filtered: Vec<&'static str> = base
        .iter()
        .copied()
        .filter(|idea| {
            let lower = idea.to_lowercase();
            !(diabetic && (lower.contains("granola") || lower.contains("sweet")))
                && !(cardiac && lower.contains("beef"))
        })
        .collect();

    if filtered.is_empty() {
        base.to_vec()
    } else {
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn first() -> StepRng {
        StepRng::new(0, 0)
    }

    fn diabetic() -> AdvisorContext {
        AdvisorContext {
            conditions: vec![ConditionKey::Diabetes, ConditionKey::HeartDisease],
            ..Default::default()
        }
    }

    #[test]
    fn test_greeting() {
        let mut advisor = Advisor::default();
        let reply = advisor.get_response("  HELLO there ", None, &mut first());
        assert_eq!(
            reply,
            "Hello! I'm your personal diet assistant. How can I help you with your nutrition goals today?"
        );
    }

    #[test]
    fn test_unmatched_uses_default() {
        let mut advisor = Advisor::default();
        let reply = advisor.get_response("xyz", None, &mut first());
        assert!(reply.starts_with("I'm here to help with diet and nutrition questions."));
    }

    #[test]
    fn test_meal_planning_suffix_priority() {
        let mut advisor = Advisor::default();
        let reply = advisor.get_response("Give me a meal plan", Some(&diabetic()), &mut first());
        assert!(reply.ends_with(" Since you have diabetes, focus on complex carbs and monitor portions."));

        let hypertensive = AdvisorContext {
            conditions: vec![ConditionKey::Obesity, ConditionKey::Hypertension],
            ..Default::default()
        };
        let reply = advisor.get_response("meal plan", Some(&hypertensive), &mut first());
        assert!(reply.ends_with(" With high blood pressure, keep sodium under 1500mg daily."));
    }

    #[test]
    fn test_suffix_only_for_meal_planning() {
        let mut advisor = Advisor::default();
        let reply = advisor.get_response("glucose", Some(&diabetic()), &mut first());
        assert!(!reply.contains("Since you have diabetes"));
    }

    #[test]
    fn test_name_and_calorie_personalization() {
        let mut advisor = Advisor::default();
        let context = AdvisorContext {
            name: Some("Asha".into()),
            conditions: vec![],
            daily_calories: Some(1600),
        };

        // First weight_loss reply mentions a calorie deficit
        let reply = advisor.get_response("I want to lose weight", Some(&context), &mut first());
        assert!(reply.starts_with("Asha, for healthy weight loss"));
        assert!(reply.ends_with(" Based on your profile, aim for around 1600 calories daily."));

        let reply = advisor.get_response("hello", Some(&context), &mut first());
        assert!(reply.starts_with("Asha, hello!"));
        assert!(!reply.contains("Based on your profile"));
    }

    #[test]
    fn test_missing_default_returns_apology() {
        let table = ResponseTable::from_json_str(
            r#"[{"name": "greetings", "patterns": ["hello"], "responses": ["Hi"]}]"#,
        )
        .unwrap();
        let mut advisor = Advisor::new(table);

        assert_eq!(advisor.get_response("hello", None, &mut first()), "Hi");
        assert_eq!(advisor.get_response("weather?", None, &mut first()), APOLOGY);
    }

    #[test]
    fn test_history_records_both_sides() {
        let mut advisor = Advisor::default();
        advisor.get_response("hello", None, &mut first());

        let history = advisor.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].speaker, Speaker::User);
        assert_eq!(history[0].text, "hello");
        assert_eq!(history[1].speaker, Speaker::Advisor);
        assert!(history[0].timestamp <= history[1].timestamp);

        for _ in 0..10 {
            advisor.get_response("hello", None, &mut first());
        }
        assert_eq!(advisor.history().len(), 22);
        assert_eq!(advisor.recent_history().len(), RECENT_HISTORY_LEN);

        advisor.clear_history();
        assert!(advisor.history().is_empty());
    }

    #[test]
    fn test_context_from_profile() {
        let mut profile = Profile::new("Ravi", 60, "male");
        profile.medical_conditions = "Diabetes".into();

        let context = AdvisorContext::from(&profile);
        assert_eq!(context.name.as_deref(), Some("Ravi"));
        assert_eq!(context.conditions, vec![ConditionKey::Diabetes]);
        // 1800 - 300 - 100 + 200
        assert_eq!(context.daily_calories, Some(1600));

        profile.daily_calories = Some(2200);
        assert_eq!(AdvisorContext::from(&profile).daily_calories, Some(2200));
    }

    #[test]
    fn test_meal_suggestions_filtering() {
        assert_eq!(meal_suggestions("breakfast", None).len(), 4);
        assert_eq!(meal_suggestions("brunch", None), SNACK_SUGGESTIONS.to_vec());

        let breakfast = meal_suggestions("Breakfast", Some(&diabetic()));
        assert!(!breakfast.iter().any(|s| s.contains("granola")));
        assert_eq!(breakfast[0], "Try oatmeal with berries and nuts");

        let dinner = meal_suggestions("dinner", Some(&diabetic()));
        assert_eq!(
            dinner,
            vec!["Grilled fish with roasted vegetables", "Tofu curry with quinoa and spinach"]
        );
    }
}
