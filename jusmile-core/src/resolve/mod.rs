//! Turning a food or exercise entry into an energy and macro estimate.

mod cascade;
mod suggest;

pub use cascade::{
    resolve, resolve_exercise, unit_options, Cascade, CategoryResolver, Fallback, FoodQuery,
    LineResult, PreciseResolver, Resolution, ResolutionSource, Resolver, UnitConversionResolver,
    PRECISE_TYPE, UNIT_WHITELIST,
};
pub use suggest::{
    food_pool, normalize_name, rank, suggest_exercises, suggest_foods, EXERCISE_SUGGESTION_LIMIT,
    FOOD_SUGGESTION_LIMIT,
};
