use crate::{
    hal::{impl_hal_resource, Resource},
    transport::RequestOptions,
    Error,
};
use serde::{Deserialize, Serialize};

/// A knowledge based authentication session: questions to ask the customer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Kba {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    #[serde(default)]
    pub questions: Vec<KbaQuestion>,
}

impl_hal_resource!(Kba);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KbaQuestion {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub answers: Vec<KbaAnswer>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct KbaAnswer {
    pub id: String,
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct KbaRequest {
    pub answers: Vec<KbaQuestionAnswer>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KbaQuestionAnswer {
    pub question_id: String,
    pub answer_id: String,
}

impl KbaRequest {
    /// Adds the answer picked for a question.
    pub fn answer(mut self, question_id: impl Into<String>, answer_id: impl Into<String>) -> Self {
        self.answers.push(KbaQuestionAnswer {
            question_id: question_id.into(),
            answer_id: answer_id.into(),
        });
        self
    }
}

impl Kba {
    /// Submits the answers of the customer.
    #[tracing::instrument(name = "Verify KBA", skip_all, fields(id = %self.id))]
    pub async fn verify(&self, req: &KbaRequest) -> Result<(), Error> {
        let (transport, link) = self.resource.follow("self")?;

        transport
            .submit_without_response(&link.href, Some(req), &RequestOptions::default())
            .await?;

        Ok(())
    }
}
