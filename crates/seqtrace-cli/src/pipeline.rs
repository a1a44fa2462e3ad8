//! Demo pipelines run by every subcommand.

use anyhow::anyhow;
use seqtrace_core::{IntoTraced, Traced, TracedSequence};

use crate::cli::PipelineKind;

/// Run `kind` over `tokens`, returning the final traced view.
pub fn build(kind: PipelineKind, tokens: &[String]) -> anyhow::Result<Box<dyn Traced>> {
    let numbers = parse(tokens);
    tracing::debug!(
        pipeline = ?kind,
        tokens = tokens.len(),
        parsed = numbers.len(),
        "running pipeline"
    );

    let view: Box<dyn Traced> = match kind {
        PipelineKind::Product => Box::new(numbers.unique().sorted().try_fold(1_i64, |acc, &x| {
            acc.checked_mul(x)
                .ok_or_else(|| anyhow!("product overflowed i64 after multiplying by {x}"))
        })?),
        PipelineKind::Sum => Box::new(numbers.try_fold(0_i64, |acc, &x| {
            acc.checked_add(x)
                .ok_or_else(|| anyhow!("sum overflowed i64 after adding {x}"))
        })?),
        PipelineKind::Distinct => Box::new(numbers.unique().sorted()),
    };
    Ok(view)
}

fn parse(tokens: &[String]) -> TracedSequence<i64> {
    tokens
        .to_vec()
        .traced()
        .filter_map(|token| token.trim().parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    fn step_names(view: &dyn Traced) -> Vec<String> {
        view.history().iter().map(|step| step.name().to_string()).collect()
    }

    #[test]
    fn product_multiplies_distinct_parsed_values() {
        let view = build(PipelineKind::Product, &tokens(&["2", "3", "x", "3", "5"])).unwrap();
        assert_eq!(view.display_elements(), vec!["30"]);
        assert_eq!(view.declared_type_name(), "i64");
        assert_eq!(step_names(&*view), ["filter_map", "unique", "sorted", "fold"]);
        assert_eq!(view.history().get(0).unwrap().source_type_name(), "String");
    }

    #[test]
    fn product_overflow_is_an_error() {
        let huge = i64::MAX.to_string();
        let error = build(PipelineKind::Product, &tokens(&[huge.as_str(), "2"])).err().unwrap();
        assert!(error.to_string().contains("overflowed"), "{error}");
    }

    #[test]
    fn sum_keeps_duplicates() {
        let view = build(PipelineKind::Sum, &tokens(&["4", "4", "nope", "-1"])).unwrap();
        assert_eq!(view.display_elements(), vec!["7"]);
        assert_eq!(step_names(&*view), ["filter_map", "fold"]);
    }

    #[test]
    fn distinct_ends_in_a_sequence() {
        let view = build(PipelineKind::Distinct, &tokens(&["9", "1", "9", "5"])).unwrap();
        assert_eq!(view.display_elements(), vec!["1", "5", "9"]);
        assert_eq!(view.declared_type_name(), "i64");
    }

    #[test]
    fn no_parsable_tokens_still_traces() {
        let view = build(PipelineKind::Product, &tokens(&["a", "b"])).unwrap();
        assert_eq!(view.display_elements(), vec!["1"]);
        assert_eq!(view.history().len(), 4);
        assert!(view.history().last().unwrap().edges().is_empty());
    }
}
