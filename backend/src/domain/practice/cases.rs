//! Before/after case gallery.

use chrono::NaiveDate;
use practice_data::CaseStudySeed;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{SortDirection, contains_folded, fold_needle};

/// Condition filter value that disables filtering.
pub const ALL_CONDITIONS: &str = "All";

/// Anonymised patient shown on a case card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CasePatient {
    /// Abbreviated name, e.g. `Sarah J.`.
    pub name: String,
    /// Age at treatment.
    pub age: u32,
    /// Gender as recorded.
    pub gender: String,
}

/// Published case study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    /// Case identifier.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Anonymised patient.
    pub patient: CasePatient,
    /// Treated condition.
    pub condition: String,
    /// Treatment length, e.g. `6 months`.
    pub duration: String,
    /// Date treatment began.
    pub treatment_date: NaiveDate,
    /// Remedies prescribed.
    pub remedies: Vec<String>,
    /// Narrative summary.
    pub description: String,
    /// Outcome score in percent.
    pub success_rate: u8,
    /// Image before treatment.
    pub before_image: String,
    /// Image after treatment.
    pub after_image: String,
    /// Search tags.
    pub tags: Vec<String>,
}

impl From<&CaseStudySeed> for CaseStudy {
    fn from(seed: &CaseStudySeed) -> Self {
        Self {
            id: seed.id.clone(),
            title: seed.title.clone(),
            patient: CasePatient {
                name: seed.patient.name.clone(),
                age: seed.patient.age,
                gender: seed.patient.gender.clone(),
            },
            condition: seed.condition.clone(),
            duration: seed.duration.clone(),
            treatment_date: seed.treatment_date,
            remedies: seed.remedies.clone(),
            description: seed.description.clone(),
            success_rate: seed.success_rate,
            before_image: seed.before_image.clone(),
            after_image: seed.after_image.clone(),
            tags: seed.tags.clone(),
        }
    }
}

/// Sortable gallery columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum CaseSortField {
    /// By treatment start date.
    #[default]
    TreatmentDate,
    /// By outcome score.
    SuccessRate,
    /// Alphabetical by title.
    Title,
}

/// Filters and ordering for the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseGalleryQuery {
    /// Case-insensitive match against title, condition and tags.
    pub search: Option<String>,
    /// Exact condition; `None` or `"All"` disables the filter.
    pub condition: Option<String>,
    /// Sort column.
    pub sort: CaseSortField,
    /// Sort direction.
    pub direction: SortDirection,
}

impl Default for CaseGalleryQuery {
    /// Newest treatments first.
    fn default() -> Self {
        Self {
            search: None,
            condition: None,
            sort: CaseSortField::TreatmentDate,
            direction: SortDirection::Desc,
        }
    }
}

impl CaseGalleryQuery {
    /// Apply a column header click: the active column flips direction, a new
    /// column starts ascending.
    ///
    /// # Examples
    /// ```
    /// use careandcure::domain::practice::{CaseGalleryQuery, CaseSortField, SortDirection};
    ///
    /// let query = CaseGalleryQuery::default().toggle_sort(CaseSortField::TreatmentDate);
    /// assert_eq!(query.direction, SortDirection::Asc);
    /// let query = query.toggle_sort(CaseSortField::Title);
    /// assert_eq!((query.sort, query.direction), (CaseSortField::Title, SortDirection::Asc));
    /// ```
    #[must_use]
    pub fn toggle_sort(mut self, field: CaseSortField) -> Self {
        if self.sort == field {
            self.direction = self.direction.flipped();
        } else {
            self.sort = field;
            self.direction = SortDirection::Asc;
        }
        self
    }

    fn condition_filter(&self) -> Option<&str> {
        self.condition
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CONDITIONS)
    }
}

/// Gallery page: filtered cases plus the condition picker options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseGallery {
    /// Cases after filtering and sorting.
    pub cases: Vec<CaseStudy>,
    /// `All` followed by each distinct condition in publication order.
    pub conditions: Vec<String>,
    /// Applied sort column.
    pub sort: CaseSortField,
    /// Applied sort direction.
    pub direction: SortDirection,
}

/// Filter and sort the published cases.
#[must_use]
pub fn case_gallery(studies: &[CaseStudySeed], query: &CaseGalleryQuery) -> CaseGallery {
    let mut conditions = vec![ALL_CONDITIONS.to_owned()];
    for study in studies {
        if !conditions.contains(&study.condition) {
            conditions.push(study.condition.clone());
        }
    }

    let needle = fold_needle(query.search.as_deref());
    let condition = query.condition_filter();
    let mut cases: Vec<CaseStudy> = studies
        .iter()
        .filter(|s| condition.is_none_or(|c| s.condition == c))
        .filter(|s| {
            contains_folded(&s.title, &needle)
                || contains_folded(&s.condition, &needle)
                || s.tags.iter().any(|tag| contains_folded(tag, &needle))
        })
        .map(CaseStudy::from)
        .collect();

    cases.sort_by(|a, b| {
        let ordering = match query.sort {
            CaseSortField::TreatmentDate => a.treatment_date.cmp(&b.treatment_date),
            CaseSortField::SuccessRate => a.success_rate.cmp(&b.success_rate),
            CaseSortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        };
        query.direction.apply(ordering)
    });

    CaseGallery {
        cases,
        conditions,
        sort: query.sort,
        direction: query.direction,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for gallery filtering and ordering.
    use super::*;
    use practice_data::PracticeRegistry;
    use rstest::{fixture, rstest};

    #[fixture]
    fn studies() -> Vec<CaseStudySeed> {
        PracticeRegistry::bundled()
            .expect("bundled registry")
            .case_studies()
            .to_vec()
    }

    fn ids(gallery: &CaseGallery) -> Vec<&str> {
        gallery.cases.iter().map(|c| c.id.as_str()).collect()
    }

    #[rstest]
    fn default_is_newest_first(studies: Vec<CaseStudySeed>) {
        let gallery = case_gallery(&studies, &CaseGalleryQuery::default());
        assert_eq!(ids(&gallery), vec!["3", "5", "2", "1", "4"]);
    }

    #[rstest]
    fn conditions_start_with_all_and_are_distinct(studies: Vec<CaseStudySeed>) {
        let gallery = case_gallery(&studies, &CaseGalleryQuery::default());
        assert_eq!(gallery.conditions.first().map(String::as_str), Some("All"));
        assert_eq!(gallery.conditions.len(), studies.len() + 1);
    }

    #[rstest]
    #[case::tag("pediatric", vec!["4"])]
    #[case::title("ECZEMA", vec!["2"])]
    #[case::shared_tag("constitutional", vec!["2", "1"])]
    fn search_matches_title_condition_and_tags(
        studies: Vec<CaseStudySeed>,
        #[case] search: &str,
        #[case] expected: Vec<&str>,
    ) {
        let query = CaseGalleryQuery {
            search: Some(search.to_owned()),
            ..CaseGalleryQuery::default()
        };
        assert_eq!(ids(&case_gallery(&studies, &query)), expected);
    }

    #[rstest]
    #[case(Some("All".to_owned()), 5)]
    #[case(None, 5)]
    #[case(Some("Chronic Migraine".to_owned()), 1)]
    #[case(Some("chronic migraine".to_owned()), 0)]
    fn condition_filter(
        studies: Vec<CaseStudySeed>,
        #[case] condition: Option<String>,
        #[case] expected: usize,
    ) {
        let query = CaseGalleryQuery {
            condition,
            ..CaseGalleryQuery::default()
        };
        assert_eq!(case_gallery(&studies, &query).cases.len(), expected);
    }

    #[rstest]
    fn success_rate_ascending(studies: Vec<CaseStudySeed>) {
        let query = CaseGalleryQuery::default().toggle_sort(CaseSortField::SuccessRate);
        let gallery = case_gallery(&studies, &query);
        assert_eq!(gallery.direction, SortDirection::Asc);
        assert!(
            gallery
                .cases
                .windows(2)
                .all(|w| w[0].success_rate <= w[1].success_rate)
        );
    }

    #[rstest]
    fn title_sort_ignores_case(mut studies: Vec<CaseStudySeed>) {
        if let Some(eczema) = studies.iter_mut().find(|s| s.id == "2") {
            eczema.title = "eczema recovery case".to_owned();
        }
        let query = CaseGalleryQuery::default().toggle_sort(CaseSortField::Title);
        let gallery = case_gallery(&studies, &query);
        assert_eq!(ids(&gallery), vec!["3", "4", "1", "2", "5"]);
    }

    #[test]
    fn toggling_same_field_twice_restores_direction() {
        let query = CaseGalleryQuery::default();
        let toggled = query.clone().toggle_sort(CaseSortField::TreatmentDate);
        assert_eq!(toggled.direction, SortDirection::Asc);
        assert_eq!(
            toggled.toggle_sort(CaseSortField::TreatmentDate),
            query
        );
    }
}
