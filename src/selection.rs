use thiserror::Error;

/// What the user asked to do with the displayed pipeline listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// "yes": every listed pipeline.
    All,
    /// "no": nothing, stop here.
    Cancel,
    /// "reject": every listed pipeline, with a rejection disposition.
    RejectAll,
    /// 1-based positions into the listing, duplicates and order preserved.
    Indices(Vec<usize>),
}

/// The "reject" keyword only means something when approving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Run,
    Approve,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Input not recognised: '{input}'")]
    Unrecognized { input: String },

    #[error("Invalid range '{input}': {reason}")]
    InvalidRange { input: String, reason: String },

    #[error("Selection {value} is out of range, pick between 1 and {count}")]
    OutOfRange { value: usize, count: usize },
}

/// Classifies one line of user input against a listing of `count` pipelines.
///
/// Accepted forms, checked in order:
/// - "yes" / "no" / "reject" (case-insensitive; "reject" in Approve mode only)
/// - a bare 1-based index, bounds-checked against [1, count]
/// - a range "A-B" with A < B and B - A <= count; the endpoints themselves are
///   not bounds-checked here, [`resolve_indices`] catches strays at lookup
/// - a comma-separated list "A,B,C" with optional whitespace; bounds are
///   checked on the numeric extremes, which pins every element into [1, count]
///
/// Anything else is rejected before any remote call is made.
pub fn parse_selection(
    input: &str,
    count: usize,
    mode: SelectionMode,
) -> Result<Selection, SelectionError> {
    let trimmed = input.trim();

    if trimmed.eq_ignore_ascii_case("yes") {
        return Ok(Selection::All);
    }
    if trimmed.eq_ignore_ascii_case("no") {
        return Ok(Selection::Cancel);
    }
    if trimmed.eq_ignore_ascii_case("reject") {
        return match mode {
            SelectionMode::Approve => Ok(Selection::RejectAll),
            SelectionMode::Run => Err(unrecognized(trimmed)),
        };
    }

    if let Ok(value) = trimmed.parse::<usize>() {
        if value < 1 || value > count {
            return Err(SelectionError::OutOfRange { value, count });
        }
        return Ok(Selection::Indices(vec![value]));
    }

    if let Some(range) = parse_range(trimmed, count)? {
        return Ok(range);
    }

    if trimmed.contains(',') {
        return parse_list(trimmed, count);
    }

    Err(unrecognized(trimmed))
}

/// Checked 1-based lookup of parsed indices into the displayed listing.
///
/// Range endpoints escape bounds-checking in [`parse_selection`], so every
/// index is validated here before anything remote happens.
pub fn resolve_indices<'a, T>(
    indices: &[usize],
    items: &'a [T],
) -> Result<Vec<&'a T>, SelectionError> {
    indices
        .iter()
        .map(|&index| {
            index
                .checked_sub(1)
                .and_then(|i| items.get(i))
                .ok_or(SelectionError::OutOfRange {
                    value: index,
                    count: items.len(),
                })
        })
        .collect()
}

fn unrecognized(input: &str) -> SelectionError {
    SelectionError::Unrecognized {
        input: input.to_owned(),
    }
}

fn parse_range(input: &str, count: usize) -> Result<Option<Selection>, SelectionError> {
    let Some((start, end)) = input.split_once('-') else {
        return Ok(None);
    };
    let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>())
    else {
        return Ok(None);
    };

    if start >= end {
        return Err(SelectionError::InvalidRange {
            input: input.to_owned(),
            reason: "start must be below end".to_owned(),
        });
    }
    if end - start > count {
        return Err(SelectionError::InvalidRange {
            input: input.to_owned(),
            reason: "range is wider than the number of pipelines listed".to_owned(),
        });
    }

    Ok(Some(Selection::Indices((start..=end).collect())))
}

fn parse_list(input: &str, count: usize) -> Result<Selection, SelectionError> {
    let mut values = Vec::new();
    for part in input.split(',') {
        match part.trim().parse::<usize>() {
            Ok(value) => values.push(value),
            Err(_) => return Err(unrecognized(input)),
        }
    }

    let min = *values.iter().min().expect("split yields at least one part");
    let max = *values.iter().max().expect("split yields at least one part");
    if min < 1 {
        return Err(SelectionError::OutOfRange { value: min, count });
    }
    if max > count {
        return Err(SelectionError::OutOfRange { value: max, count });
    }

    Ok(Selection::Indices(values))
}
