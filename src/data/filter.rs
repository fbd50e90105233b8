use super::model::{Dataset, FieldError, Record};
use crate::fnutil::{try_all_of, try_exists_match};

/// Batter id of chocolate batter in the bakery inventory.
pub const CHOCOLATE_BATTER_ID: &str = "1002";

// ---------------------------------------------------------------------------
// Domain predicates: a bound constant captured in a closure
// ---------------------------------------------------------------------------

/// `ppu > threshold`. A record without `ppu` is an error, not a non-match.
pub fn above_price_threshold(threshold: f64) -> impl Fn(&Record) -> Result<bool, FieldError> {
    move |item| Ok(item.ppu()? > threshold)
}

/// `type == kind`. A non-string `type` never matches.
pub fn is_type(kind: impl Into<String>) -> impl Fn(&Record) -> Result<bool, FieldError> {
    let kind = kind.into();
    move |item| item.field_equals("type", &kind)
}

/// Some batter of the item has the given id.
pub fn has_batter(batter_id: impl Into<String>) -> impl Fn(&Record) -> Result<bool, FieldError> {
    let batter_id = batter_id.into();
    move |item| {
        try_exists_match(
            |batter: &&Record| batter.field_equals("id", &batter_id),
            item.batters()?,
        )
    }
}

// ---------------------------------------------------------------------------
// Generic filtering
// ---------------------------------------------------------------------------

/// Keep the records satisfying `predicate`, in order.
///
/// All-or-nothing: the first lookup failure aborts the whole pass.
pub fn filter_records<'d, P>(
    items: &'d [Record],
    predicate: P,
) -> Result<Vec<&'d Record>, FieldError>
where
    P: Fn(&Record) -> Result<bool, FieldError>,
{
    items
        .iter()
        .filter_map(|item| match predicate(item) {
            Ok(true) => Some(Ok(item)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        })
        .collect()
}

/// Project records to their `name` field.
pub fn names<'d>(records: &[&'d Record]) -> Result<Vec<&'d str>, FieldError> {
    records.iter().map(|r| r.name()).collect()
}

// ---------------------------------------------------------------------------
// Imperative style
// ---------------------------------------------------------------------------

/// Items priced above the dataset's current threshold.
pub fn items_above_threshold(dataset: &Dataset) -> Result<Vec<&Record>, FieldError> {
    let is_above_threshold = above_price_threshold(dataset.price_thresh_now);
    let mut items = Vec::new();

    for item in &dataset.items {
        if is_above_threshold(item)? {
            items.push(item);
        }
    }

    Ok(items)
}

/// Items whose `type` equals `kind`.
pub fn items_of_type<'d>(dataset: &'d Dataset, kind: &str) -> Result<Vec<&'d Record>, FieldError> {
    let is_kind = is_type(kind);
    let mut items = Vec::new();

    for item in &dataset.items {
        if is_kind(item)? {
            items.push(item);
        }
    }

    Ok(items)
}

/// Chocolate-batter items above the threshold, written with explicit loops.
pub fn chocolate_items_imperative(dataset: &Dataset) -> Result<Vec<&Record>, FieldError> {
    let mut chocolate = Vec::new();

    for item in &dataset.items {
        let mut is_chocolate = false;
        for batter in item.batters()? {
            if batter.field_equals("id", CHOCOLATE_BATTER_ID)? {
                is_chocolate = true;
                break;
            }
        }
        if is_chocolate {
            chocolate.push(item);
        }
    }

    let mut items = Vec::new();
    for item in chocolate {
        if item.ppu()? > dataset.price_thresh_now {
            items.push(item);
        }
    }

    Ok(items)
}

// ---------------------------------------------------------------------------
// Functional style
// ---------------------------------------------------------------------------

/// Chocolate-batter items above the threshold, built from combinators.
pub fn chocolate_items_functional(dataset: &Dataset) -> Result<Vec<&Record>, FieldError> {
    let should_be_printed = try_all_of::<Record, FieldError>(vec![
        Box::new(has_batter(CHOCOLATE_BATTER_ID)),
        Box::new(above_price_threshold(dataset.price_thresh_now)),
    ]);

    filter_records(&dataset.items, should_be_printed)
}
