//! Builders and record-source doubles for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::database::models::{Advocate, AdvocateRow, NewAdvocate};
use crate::source::{RecordSource, RecordSourceError, SearchPage, SearchRequest, SourceKind};

pub fn row(id: i32) -> AdvocateRow {
    AdvocateRow {
        id,
        first_name: "John".into(),
        last_name: "Doe".into(),
        city: "New York".into(),
        degree: "MD".into(),
        specialties: json!(["Bipolar", "LGBTQ"]),
        years_of_experience: 10,
        phone_number: 5551234567,
        created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
    }
}

pub fn advocate(id: i32, first_name: &str, last_name: &str, specialties: &[&str], years: i32) -> Advocate {
    Advocate {
        id,
        first_name: first_name.into(),
        last_name: last_name.into(),
        city: "New York".into(),
        degree: "MD".into(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        years_of_experience: years,
        phone_number: 5551234567,
        created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
    }
}

pub fn new_advocate(first_name: &str, specialties: &[&str]) -> NewAdvocate {
    NewAdvocate {
        first_name: first_name.into(),
        last_name: "Tester".into(),
        city: "Chicago".into(),
        degree: "MSW".into(),
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
        years_of_experience: 2,
        phone_number: 5550001111,
    }
}

/// Records every request and answers with an empty page.
#[derive(Default)]
pub struct RecordingSource {
    requests: Mutex<Vec<SearchRequest>>,
}

impl RecordingSource {
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordSource for RecordingSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Fixture
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchPage, RecordSourceError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(SearchPage { records: vec![], total: 0 })
    }

    async fn health_check(&self) -> Result<(), RecordSourceError> {
        Ok(())
    }
}
