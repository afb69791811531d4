//! # sovran-tups
//!
//! Chainable mapping and tuple-list containers for reshaping nested data.
//!
//! `sovran-tups` gives two container shapes a set of fluent transforms, so
//! that reshape, filter and aggregate steps read as one pipeline instead of a
//! pile of loops:
//!
//! - [`SuperDict`]: an insertion-ordered key to value mapping
//! - [`TupList`]: an ordered list of fixed-arity records
//! - [`OrderSet`]: an ordered axis of distinct values (periods, say) with
//!   position lookups
//!
//! plus the conversions between them: mapping to rows ([`SuperDict::to_tuplist`]),
//! rows to mapping ([`TupList::to_dict`]), and flat composite keys to nested
//! levels and back ([`SuperDict::to_dictdict`], [`SuperDict::to_dictup`]).
//!
//! ## Key Features
//!
//! - **Typed**: containers are generic; operations that need a capability
//!   (a length, an emptiness notion, positional fields) are bounded on a trait
//! - **Explicit mutability**: `&self` methods return a new container, `&mut self`
//!   methods edit in place and return `&mut Self` for chaining
//! - **Heterogeneous records**: fields are carried as [`Value`], so `("A", 1)`
//!   style records group, sort and dedup without ceremony
//! - **Eager**: every operation runs to completion; there is no lazy plan
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_tups::{SuperDict, TupsError};
//!
//! fn main() -> Result<(), TupsError> {
//!     let stock = SuperDict::from([("apple", 3), ("pear", 0), ("plum", 5)]);
//!
//!     // Copying transforms chain
//!     let restock = stock.clean_value(&0).apply(|n| n * 10);
//!     println!("Restock: {:?}", restock.keys_l());
//!
//!     // Strict lookups report the missing key
//!     match stock.get("kiwi") {
//!         Ok(n) => println!("kiwi: {}", n),
//!         Err(TupsError::KeyNotFound(key)) => println!("no {}", key),
//!         Err(e) => return Err(e),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Pivoting Between Shapes
//!
//! ```rust
//! use sovran_tups::{tup, TupList, TupsError, Value};
//!
//! fn main() -> Result<(), TupsError> {
//!     let sales = TupList::from(vec![
//!         ("north", "jan", 10),
//!         ("north", "feb", 12),
//!         ("south", "jan", 7),
//!     ]);
//!
//!     // Key by (region, month), value is the last column
//!     let by_key = sales.to_dict(&[2])?;
//!     assert_eq!(by_key[&Value::from(tup!["south", "jan"])], Value::Int(7));
//!
//!     // Group the months of each region
//!     let months = sales.take(&[0, 1])?.to_dict_list(&[1])?;
//!     assert_eq!(months[&Value::from("north")].len(), 2);
//!
//!     // Nest the composite keys, then flatten back to rows
//!     let nested = by_key.to_dictdict()?;
//!     assert_eq!(nested.to_dictup(), by_key);
//!     assert_eq!(by_key.to_tuplist().len(), 3);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Compressing Periods
//!
//! ```rust
//! use sovran_tups::{successor, tup, StartFinish, TupList, TupsError};
//!
//! fn main() -> Result<(), TupsError> {
//!     let rented = TupList::from(vec![
//!         ("car1", "2018-11"),
//!         ("car1", "2018-12"),
//!         ("car1", "2019-01"),
//!         ("car2", "2019-03"),
//!     ]);
//!
//!     let spans = rented.to_start_finish(&StartFinish::new().successor(successor::next_month))?;
//!     assert_eq!(
//!         spans.to_list(),
//!         vec![
//!             tup!["car1", "2018-11", "2019-01"],
//!             tup!["car2", "2019-03", "2019-03"],
//!         ]
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Error Handling
//!
//! ```rust
//! use sovran_tups::{SuperDict, TupsError};
//!
//! let mut d: SuperDict<&str, i32> = SuperDict::new();
//!
//! match d.set_m_each(["a", "b", "c"], [1, 2]) {
//!     Ok(_) => println!("set"),
//!     Err(TupsError::ShapeMismatch { expected, found, .. }) => {
//!         println!("{} keys but {} values", expected, found)
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! assert!(d.is_empty());
//! ```

mod convert;
mod error;
mod nested;
mod orderset;
mod runs;
pub mod successor;
mod superdict;
mod traits;
mod tup;
mod tuplist;
mod value;


pub use convert::Pivot;
pub use error::{Result, TupsError};
pub use nested::Nested;
pub use orderset::OrderSet;
pub use runs::StartFinish;
pub use superdict::{KeyPolicy, SuperDict};
pub use traits::{Blank, Flatten, Measure, Record, Spread};
pub use tup::Tup;
pub use tuplist::TupList;
pub use value::Value;
