/// Data layer: inventory types, loading, and filtering.
///
/// Architecture:
/// ```text
///  bakery_inventory.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  threshold + Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply field predicates → matching records
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
