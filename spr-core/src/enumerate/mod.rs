use crate::synth::{is_fuzzable, synthesize_url_with, ParamOverrides, INT_FUZZ_VALUES};
use crate::types::{ApiDescription, Operation, Task};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerateOptions {
    /// Expand each GET operation that has a free integer path/query parameter into one
    /// task per [`INT_FUZZ_VALUES`] entry.
    pub int_fuzzing: bool,
}

/// Lazily yields one GET [`Task`] per GET operation, in document order.
///
/// Operations with any other method are skipped. URLs are synthesized as the iterator is
/// advanced, so a consumer that stops early never pays for the rest of the document.
pub fn enumerate<'a>(
    description: &'a ApiDescription,
    base_host: &'a str,
    overrides: &'a ParamOverrides,
) -> impl Iterator<Item = Task> + 'a {
    enumerate_with(description, base_host, overrides, EnumerateOptions::default())
}

pub fn enumerate_with<'a>(
    description: &'a ApiDescription,
    base_host: &'a str,
    overrides: &'a ParamOverrides,
    options: EnumerateOptions,
) -> impl Iterator<Item = Task> + 'a {
    description.paths.iter().flat_map(move |item| {
        item.operations
            .iter()
            .filter(|op| op.is_get())
            .flat_map(move |op| {
                let fuzz = options.int_fuzzing && has_fuzzable_param(op, overrides);
                let variants = if fuzz { INT_FUZZ_VALUES.len() } else { 1 };
                (0..variants).map(move |i| {
                    let int_value = fuzz.then(|| INT_FUZZ_VALUES[i].to_string());
                    Task::get(synthesize_url_with(
                        base_host,
                        &item.template,
                        &op.parameters,
                        overrides,
                        int_value.as_deref(),
                    ))
                })
            })
    })
}

fn has_fuzzable_param(op: &Operation, overrides: &ParamOverrides) -> bool {
    op.parameters.iter().any(|p| is_fuzzable(p, overrides))
}
