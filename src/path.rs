//! Path grammar and resolution.
//!
//! ```text
//! path    := element ("." element)*
//! element := name? ("[" digits "]")*
//! ```
//!
//! A name may be omitted only when an index follows, e.g. `[0].id` on a
//! document whose root is an array.

use serde_json::Value;

use crate::error::PathError;
use crate::types::Step;

pub fn parse(path: &str) -> Result<Vec<Step>, PathError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let mut steps = Vec::new();
    let mut offset = 0;
    for element in path.split('.') {
        parse_element(element, offset, &mut steps)?;
        offset += element.len() + 1;
    }
    Ok(steps)
}

fn parse_element(element: &str, offset: usize, steps: &mut Vec<Step>) -> Result<(), PathError> {
    let name_end = element.find('[').unwrap_or(element.len());
    let (name, mut rest) = element.split_at(name_end);

    if let Some(pos) = name.find(']') {
        return Err(PathError::Unexpected { ch: ']', offset: offset + pos });
    }
    if name.is_empty() && rest.is_empty() {
        return Err(PathError::EmptySegment(offset));
    }
    if !name.is_empty() {
        steps.push(Step::Field(name.to_string()));
    }

    let mut cursor = offset + name_end;
    while let Some(after_open) = rest.strip_prefix('[') {
        let close = after_open
            .find(']')
            .ok_or(PathError::UnclosedBracket(cursor))?;
        let digits = &after_open[..close];
        let index = digits
            .parse::<usize>()
            .map_err(|_| PathError::InvalidIndex(digits.to_string()))?;
        steps.push(Step::Index(index));

        rest = &after_open[close + 1..];
        cursor += close + 2;
    }

    match rest.chars().next() {
        None => Ok(()),
        Some(ch) => Err(PathError::Unexpected { ch, offset: cursor }),
    }
}

/// Follow parsed steps from `root`; any type mismatch or missing entry is `None`.
pub fn walk_steps<'a>(root: &'a Value, steps: &[Step]) -> Option<&'a Value> {
    steps.iter().try_fold(root, |current, step| match (step, current) {
        (Step::Field(name), Value::Object(map)) => map.get(name),
        (Step::Index(i), Value::Array(arr)) => arr.get(*i),
        (Step::Field(_) | Step::Index(_), _) => None,
    })
}

/// Fetch the node at `path`, or `None` when the path is malformed or absent.
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    match parse(path) {
        Ok(steps) => walk_steps(root, &steps),
        Err(e) => {
            tracing::debug!(path, error = %e, "unparseable path");
            None
        }
    }
}
