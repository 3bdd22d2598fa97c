use async_trait::async_trait;
use chrono::Utc;

use crate::database::models::{Advocate, AdvocateRow, NewAdvocate};
use crate::filter::filter_match::{matches, newest_first};

use super::{fixture_data, validate_rows, RecordSource, RecordSourceError, SearchPage, SearchRequest, SourceKind};

/// Serves a fixed in-memory dataset with the same matching, ordering and
/// pagination as the store.
pub struct FixtureRecordSource {
    records: Vec<Advocate>,
}

impl FixtureRecordSource {
    /// The built-in dataset, also used by `db seed`.
    pub fn builtin() -> Result<Self, RecordSourceError> {
        Self::new(fixture_data::advocates())
    }

    /// Assign ids in insertion order and a shared creation time, as a single
    /// bulk insert into the store would.
    pub fn new(seed: Vec<NewAdvocate>) -> Result<Self, RecordSourceError> {
        let now = Utc::now();
        let rows = (1_i32..).zip(seed).map(|(id, advocate)| advocate.into_row(id, now));
        Self::from_rows(rows)
    }

    pub fn from_rows<I>(rows: I) -> Result<Self, RecordSourceError>
    where
        I: IntoIterator<Item = AdvocateRow>,
    {
        let mut records = validate_rows(rows)?;
        records.sort_by(newest_first);
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RecordSource for FixtureRecordSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Fixture
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, RecordSourceError> {
        let matching: Vec<&Advocate> = self
            .records
            .iter()
            .filter(|advocate| request.term.as_ref().map_or(true, |term| matches(advocate, term)))
            .collect();

        let total = matching.len() as u64;
        let offset = usize::try_from(request.offset).unwrap_or(usize::MAX);
        let records = matching
            .into_iter()
            .skip(offset)
            .take(request.limit as usize)
            .cloned()
            .collect();

        Ok(SearchPage { records, total })
    }

    async fn health_check(&self) -> Result<(), RecordSourceError> {
        Ok(())
    }
}
