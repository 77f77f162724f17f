//! Translates recruiter search inputs into a SQL `WHERE` clause.

use crate::dto::candidate_dto::SearchQuery;
use std::str::FromStr;

/// Columns the free-text query is matched against.
pub const FREE_TEXT_COLUMNS: [&str; 5] = [
    "name",
    "skills",
    "current_role",
    "current_company",
    "education",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceBucket {
    ZeroToTwo,
    ThreeToFive,
    SixToTen,
    TenPlus,
}

impl ExperienceBucket {
    /// Inclusive bounds. `6-10` stops at 9 so that ten years lands only in `10+`.
    pub fn bounds(&self) -> (i32, Option<i32>) {
        match self {
            ExperienceBucket::ZeroToTwo => (0, Some(2)),
            ExperienceBucket::ThreeToFive => (3, Some(5)),
            ExperienceBucket::SixToTen => (6, Some(9)),
            ExperienceBucket::TenPlus => (10, None),
        }
    }

    #[cfg(test)]
    fn contains(&self, years: i32) -> bool {
        match self.bounds() {
            (low, Some(high)) => (low..=high).contains(&years),
            (low, None) => years >= low,
        }
    }

    fn predicate(&self) -> String {
        // Bounds come from this closed enum, never from user input.
        match self.bounds() {
            (low, Some(high)) => format!("experience_years BETWEEN {} AND {}", low, high),
            (low, None) => format!("experience_years >= {}", low),
        }
    }
}

impl FromStr for ExperienceBucket {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0-2" => Ok(ExperienceBucket::ZeroToTwo),
            "3-5" => Ok(ExperienceBucket::ThreeToFive),
            "6-10" => Ok(ExperienceBucket::SixToTen),
            "10+" => Ok(ExperienceBucket::TenPlus),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub text: Option<String>,
    pub location: Option<String>,
    pub experience: Option<ExperienceBucket>,
}

impl From<&SearchQuery> for SearchFilter {
    fn from(query: &SearchQuery) -> Self {
        Self {
            text: non_empty(query.q.as_deref()),
            location: non_empty(query.location.as_deref()),
            // Unknown buckets filter nothing, same as an empty one.
            experience: query
                .experience
                .as_deref()
                .and_then(|raw| raw.parse().ok()),
        }
    }
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.location.is_none() && self.experience.is_none()
    }

    /// Returns the `WHERE ...` clause (or an empty string) and the values to
    /// bind to its `?` placeholders, in order.
    ///
    /// Matching uses `instr` rather than `LIKE`, which folds ASCII case in SQLite.
    pub fn where_clause(&self) -> (String, Vec<String>) {
        let mut filters = Vec::new();
        let mut args = Vec::new();

        if let Some(text) = &self.text {
            let any_column = FREE_TEXT_COLUMNS
                .iter()
                .map(|column| format!("instr({}, ?) > 0", column))
                .collect::<Vec<_>>()
                .join(" OR ");
            filters.push(format!("({})", any_column));
            args.extend(FREE_TEXT_COLUMNS.iter().map(|_| text.clone()));
        }
        if let Some(location) = &self.location {
            filters.push("instr(location, ?) > 0".to_string());
            args.push(location.clone());
        }
        if let Some(bucket) = &self.experience {
            filters.push(bucket.predicate());
        }

        let clause = if filters.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", filters.join(" AND "))
        };
        (clause, args)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
