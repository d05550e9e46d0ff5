use crate::core::models::{
    response::{Insert as ResponseInsert, Query as ResponseQuery, SurveyResponse},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Survey, SurveyStatus, Update as SurveyUpdate},
};
use crate::error::Error;
use crate::request::Pagination;

pub trait SurveyCommon {
    async fn insert(&mut self, data: SurveyInsert) -> Result<String, Error>;
    async fn get(&mut self, id: &str) -> Result<Option<Survey>, Error>;
    async fn query(&mut self, query: &SurveyQuery, pagination: Option<Pagination>) -> Result<Vec<Survey>, Error>;
    async fn count(&mut self, query: &SurveyQuery) -> Result<i64, Error>;
    async fn update(&mut self, id: &str, data: SurveyUpdate) -> Result<(), Error>;
    /// Status transition; assigns the unique link when one is supplied.
    async fn set_status(&mut self, id: &str, status: SurveyStatus, unique_link: Option<String>) -> Result<(), Error>;
    async fn delete(&mut self, id: &str) -> Result<bool, Error>;
}

pub trait ResponseCommon {
    async fn insert(&mut self, data: ResponseInsert) -> Result<String, Error>;
    async fn get(&mut self, id: &str) -> Result<Option<SurveyResponse>, Error>;
    async fn query(&mut self, query: &ResponseQuery, pagination: Option<Pagination>) -> Result<Vec<SurveyResponse>, Error>;
    async fn count(&mut self, query: &ResponseQuery) -> Result<i64, Error>;
    async fn update(&mut self, response: SurveyResponse) -> Result<(), Error>;
}

pub trait Store: SurveyCommon + ResponseCommon {}
