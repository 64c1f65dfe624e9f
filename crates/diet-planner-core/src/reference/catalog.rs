//! Curated food catalog keyed by meal slot and health category.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Category, DietType, DietaryPreference, FoodItem, MealSlot};

/// A (slot, category, preference) combination with no compatible item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageGap {
    pub slot: MealSlot,
    pub category: Category,
    pub preference: DietaryPreference,
}

/// Food catalog: slot → category → items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FoodCatalog {
    slots: BTreeMap<MealSlot, BTreeMap<Category, Vec<FoodItem>>>,
}

impl Default for FoodCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FoodCatalog {
    /// Build a catalog from raw buckets.
    pub fn from_buckets(slots: BTreeMap<MealSlot, BTreeMap<Category, Vec<FoodItem>>>) -> Self {
        Self { slots }
    }

    /// Items for a (slot, category) bucket, if the bucket exists.
    pub fn bucket(&self, slot: MealSlot, category: Category) -> Option<&[FoodItem]> {
        self.slots
            .get(&slot)
            .and_then(|by_category| by_category.get(&category))
            .map(Vec::as_slice)
    }

    /// Names of the items in a bucket that fit a preference, in catalog order.
    pub fn compatible_names(
        &self,
        slot: MealSlot,
        category: Category,
        preference: DietaryPreference,
    ) -> Vec<&str> {
        self.bucket(slot, category)
            .unwrap_or_default()
            .iter()
            .filter(|item| preference.accepts(item.diet_type))
            .map(|item| item.name.as_str())
            .collect()
    }

    /// (slot, category) pairs with no bucket at all.
    pub fn missing_buckets(&self) -> Vec<(MealSlot, Category)> {
        MealSlot::ALL
            .iter()
            .flat_map(|&slot| Category::ALL.iter().map(move |&category| (slot, category)))
            .filter(|&(slot, category)| self.bucket(slot, category).is_none())
            .collect()
    }

    /// Combinations where a supported preference would hit the slot fallback.
    pub fn coverage_gaps(&self) -> Vec<CoverageGap> {
        let mut gaps = Vec::new();
        for slot in MealSlot::ALL {
            for category in Category::ALL {
                for preference in DietaryPreference::SUPPORTED {
                    if self.compatible_names(slot, category, preference).is_empty() {
                        gaps.push(CoverageGap {
                            slot,
                            category,
                            preference,
                        });
                    }
                }
            }
        }
        gaps
    }

    /// Total number of items across all buckets.
    pub fn len(&self) -> usize {
        self.slots
            .values()
            .flat_map(|by_category| by_category.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        use Category::{DiabeticFriendly, General, HeartHealthy};

        let mut slots = BTreeMap::new();

        slots.insert(
            MealSlot::Breakfast,
            BTreeMap::from([
                (
                    DiabeticFriendly,
                    items(&[
                        ("Steel-cut oats with chia seeds and berries", VEGAN),
                        ("Besan chilla with mixed vegetables", VEGAN),
                        ("Multigrain toast with avocado and boiled egg", EGG),
                        ("Quinoa porridge with nuts", VEGAN),
                        ("Moong dal dosa with coconut chutney (no sugar)", VEGAN),
                        ("Low-fat paneer and spinach wrap", VEG),
                    ]),
                ),
                (
                    HeartHealthy,
                    items(&[
                        ("Oats with ground flaxseed and almond milk", VEGAN),
                        ("Vegetable upma with minimal oil", VEGAN),
                        ("Ragi porridge with banana", VEGAN),
                        ("Sprouted moong salad with lemon dressing", VEGAN),
                        ("Boiled egg whites and fruit bowl", EGG),
                        ("Whole wheat toast with almond butter", VEGAN),
                    ]),
                ),
                (
                    General,
                    items(&[
                        ("Idli with sambhar", VEGAN),
                        ("Vegetable poha", VEGAN),
                        ("Vegetable paratha with curd", VEG),
                        ("Masala omelet with toast", EGG),
                        ("Boiled egg and banana smoothie", EGG),
                    ]),
                ),
            ]),
        );

        slots.insert(
            MealSlot::Lunch,
            BTreeMap::from([
                (
                    DiabeticFriendly,
                    items(&[
                        ("Brown rice with rajma and salad", VEGAN),
                        ("Whole wheat roti with methi dal and sautéed spinach", VEGAN),
                        ("Grilled tofu with stir-fried veggies", VEGAN),
                        ("Vegetable quinoa bowl with chickpeas", VEGAN),
                        ("Grilled salmon with greens", NON_VEG),
                    ]),
                ),
                (
                    HeartHealthy,
                    items(&[
                        ("Barley and lentil soup with whole grain roll", VEGAN),
                        ("Mixed veg curry with jowar roti", VEGAN),
                        ("Low-oil rajma chawal with cucumber raita", VEG),
                        ("Grilled chicken breast with sautéed vegetables", NON_VEG),
                        ("Tofu stir-fry with brown rice", VEGAN),
                    ]),
                ),
                (
                    General,
                    items(&[
                        ("Rice with dal and vegetables", VEGAN),
                        ("Roti with paneer bhurji", VEG),
                        ("Chicken curry with roti", NON_VEG),
                        ("Fish fry with rice and cucumber salad", NON_VEG),
                        ("Vegetable biryani", VEG),
                    ]),
                ),
            ]),
        );

        slots.insert(
            MealSlot::Dinner,
            BTreeMap::from([
                (
                    DiabeticFriendly,
                    items(&[
                        ("Lentil soup with mixed greens", VEGAN),
                        ("Quinoa salad with tofu and seeds", VEGAN),
                        ("Vegetable stew with millets", VEGAN),
                        ("Stir-fried broccoli with paneer", VEG),
                        ("Grilled chicken breast with lettuce wrap", NON_VEG),
                    ]),
                ),
                (
                    HeartHealthy,
                    items(&[
                        ("Vegetable khichdi with flaxseed tadka", VEGAN),
                        ("Clear vegetable soup and whole wheat toast", VEGAN),
                        ("Palak tofu curry with phulka", VEGAN),
                        ("Grilled fish with steamed veggies", NON_VEG),
                        ("Chicken stew with ragi roti", NON_VEG),
                    ]),
                ),
                (
                    General,
                    items(&[
                        ("Roti with mixed vegetable sabzi", VEGAN),
                        ("Pulao with raita", VEG),
                        ("Dal and chapati", VEGAN),
                        ("Fish curry with brown rice", NON_VEG),
                        ("Chicken and vegetable soup with toast", NON_VEG),
                    ]),
                ),
            ]),
        );

        slots.insert(
            MealSlot::Snacks,
            BTreeMap::from([
                (
                    DiabeticFriendly,
                    items(&[
                        ("Roasted chana or fox nuts", VEGAN),
                        ("Apple slices with peanut butter (no sugar added)", VEGAN),
                        ("Greek yogurt (unsweetened) with flaxseed", VEG),
                        ("Boiled egg whites", EGG),
                        ("Cucumber and tomato slices with hummus", VEGAN),
                        ("Grilled chicken strips with herbs", NON_VEG),
                        ("Tuna salad with lemon and olive oil", NON_VEG),
                    ]),
                ),
                (
                    HeartHealthy,
                    items(&[
                        ("Fresh fruit bowl with chia", VEGAN),
                        ("Air-popped popcorn with herbs", VEGAN),
                        ("Low-fat yogurt with ground flaxseed", VEG),
                        ("Mixed nuts (unsalted, limited quantity)", VEGAN),
                        ("Carrot sticks with hummus", VEGAN),
                        ("Grilled salmon bites with lime zest", NON_VEG),
                        ("Boiled egg with black pepper and herbs", EGG),
                    ]),
                ),
                (
                    General,
                    items(&[
                        ("Banana and nuts smoothie", VEG),
                        ("Vegetable sandwich (whole wheat bread)", VEG),
                        ("Bhel puri (with puffed rice and veggies)", VEGAN),
                        ("Lassi (low sugar)", VEG),
                        ("Boiled corn with lemon and spices", VEGAN),
                        ("Chicken sausage slices with mustard dip", NON_VEG),
                        ("Deviled eggs (light mayo, spices)", EGG),
                    ]),
                ),
            ]),
        );

        Self { slots }
    }
}

const VEGAN: DietType = DietType::Vegan;
const VEG: DietType = DietType::Vegetarian;
const EGG: DietType = DietType::Eggetarian;
const NON_VEG: DietType = DietType::NonVegetarian;

fn items(entries: &[(&str, DietType)]) -> Vec<FoodItem> {
    entries
        .iter()
        .map(|&(name, diet_type)| FoodItem::new(name, diet_type))
        .collect()
}
