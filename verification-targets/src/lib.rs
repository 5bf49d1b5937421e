#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/testcase-reader/main/assets/testcase-reader.svg",
    issue_tracker_base_url = "https://github.com/storyscript/testcase-reader/issues/"
)]

//! Setting-value parsers for verification test cases.
//!
//! Test case settings are plain strings. Two of them carry structure that
//! the verification engine needs in typed form:
//!
//! - **Targets**: a comma-separated list of target keywords such as
//!   `overflow,divByZero`, or `default` for every known target.
//! - **Contracts**: a comma-separated list of `source:contract` pairs such as
//!   `a.sol:A,a.sol:B`, grouped by source name.
//!
//! ## Usage
//!
//! ```
//! use verification_targets::{GroupedNameSet, TargetSet, VerificationTarget};
//!
//! let targets = TargetSet::from_setting("overflow,underflow").unwrap();
//! assert!(targets.contains(VerificationTarget::Overflow));
//! assert_eq!(targets.len(), 2);
//!
//! let contracts: GroupedNameSet = "a.sol:A,a.sol:B".parse().unwrap();
//! assert!(contracts.contains("a.sol", "B"));
//! ```
//!
//! Both parsers are all-or-nothing: one bad token rejects the whole value.

mod contracts;
mod errors;
mod targets;

pub use contracts::GroupedNameSet;
pub use errors::{SettingValueError, SettingValueResult};
pub use targets::{TargetSet, VerificationTarget};
