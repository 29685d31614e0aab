use sea_orm::{Condition, EntityTrait};
use tracing::warn;

use crate::{
    domain::query::{
        errors::FilterError,
        filter::{Filter, FilterInput, Logic},
    },
    infrastructure::query::{field_map::FieldMap, predicate::build_predicate},
};

/// What to do with a filter whose operator does not fit the field's type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    /// Fail the whole request.
    #[default]
    Reject,
    /// Drop the filter, log it and report it back to the caller as a warning.
    SkipWithWarning,
}

#[derive(Debug, Clone, Default)]
pub struct CompiledFilters {
    /// `None` when the request had no filters left to apply.
    pub condition: Option<Condition>,
    pub skipped: Vec<FilterError>,
}

/// Joins predicates in their original order. A single predicate is returned untouched,
/// so the logic only matters from two predicates on.
pub fn combine(predicates: Vec<Condition>, logic: Logic) -> Condition {
    let mut predicates = predicates.into_iter();

    let Some(first) = predicates.next() else {
        return Condition::all();
    };
    let Some(second) = predicates.next() else {
        return first;
    };

    let group = match logic {
        Logic::Or => Condition::any(),
        Logic::And => Condition::all(),
    };

    predicates.fold(group.add(first).add(second), |group, predicate| {
        group.add(predicate)
    })
}

/// Decodes, validates and combines every filter of a request against `fields`.
pub fn compile_filters<E: EntityTrait>(
    fields: &FieldMap<E>,
    inputs: &[FilterInput],
    logic: Logic,
    policy: UnsupportedPolicy,
) -> Result<CompiledFilters, FilterError> {
    let mut predicates = Vec::with_capacity(inputs.len());
    let mut skipped = Vec::new();

    for input in inputs {
        let field = fields.get(&input.field);
        let compiled = Filter::decode(input, field.map(|field| field.data_type)).and_then(|filter| {
            let field = field.ok_or_else(|| FilterError::UnknownField {
                field: filter.field.clone(),
            })?;
            build_predicate(field.column, &filter)
        });

        match compiled {
            Ok(predicate) => predicates.push(predicate),
            Err(err @ FilterError::OperatorNotAllowed { .. })
                if policy == UnsupportedPolicy::SkipWithWarning =>
            {
                warn!(field = %input.field, mode = %input.mode, error = %err, "Skipping filter");
                skipped.push(err);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(CompiledFilters {
        condition: (!predicates.is_empty()).then(|| combine(predicates, logic)),
        skipped,
    })
}
