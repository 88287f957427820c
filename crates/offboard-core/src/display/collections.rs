//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items with their own `Display` implementation and
//! prints a fixed message when empty.

use std::{fmt, ops::Index};

use crate::models::{Person, ProcessSummary, Task, Template};

macro_rules! collection {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    writeln!(f, $empty)
                } else {
                    for item in &self.0 {
                        write!(f, "{item}")?;
                    }
                    Ok(())
                }
            }
        }
    };
}

collection!(
    /// Process summaries as shown by the list view.
    ///
    /// ```rust
    /// use offboard_core::display::ProcessSummaries;
    ///
    /// assert_eq!(ProcessSummaries(vec![]).to_string(), "No processes found.\n");
    /// ```
    ProcessSummaries,
    ProcessSummary,
    "No processes found."
);

collection!(
    /// Tasks of a process.
    Tasks,
    Task,
    "No tasks found."
);

collection!(
    /// Templates with their task blueprints.
    Templates,
    Template,
    "No templates found."
);

collection!(
    /// Directory entries.
    People,
    Person,
    "No people found."
);
