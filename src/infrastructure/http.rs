use crate::domain::{
    errors::{AppError, InfrastructureError},
    exercise::{EvaluateRequest, EvaluationVerdict, Exercise, ExerciseRepository, NextExercise, SolutionEvaluator},
    logging::{LogComponent, get_logger},
    plot::Point,
};
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;

/// HTTP client for the exercises API
#[derive(Debug, Clone)]
pub struct ExerciseApiClient {
    base_url: String,
}

impl ExerciseApiClient {
    /// `base_url` without trailing slash, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn exercise_url(&self, exercise_id: &str) -> String {
        format!("{}/exercises/{}/", self.base_url, exercise_id)
    }

    pub fn first_url(&self) -> String {
        format!("{}/exercises/first/", self.base_url)
    }

    pub fn next_url(&self, exercise_id: &str) -> String {
        format!("{}/exercises/{}/next/", self.base_url, exercise_id)
    }

    pub fn evaluate_url(&self, exercise_id: &str) -> String {
        format!("{}/exercises/{}/evaluate/", self.base_url, exercise_id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, InfrastructureError> {
        get_logger().debug(LogComponent::Infrastructure("ExerciseApiClient"), &format!("GET {}", url));
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| InfrastructureError::HttpRequestFailed(format!("GET {}: {}", url, e)))?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, InfrastructureError> {
        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() { response.status_text() } else { body };
            get_logger().warn(
                LogComponent::Infrastructure("ExerciseApiClient"),
                &format!("{} {} -> {}", response.status(), response.url(), message),
            );
            return Err(InfrastructureError::HttpStatus { status: response.status(), message });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| InfrastructureError::Deserialization(e.to_string()))
    }
}

impl ExerciseRepository for ExerciseApiClient {
    async fn fetch_exercise(&self, exercise_id: &str) -> Result<Exercise, AppError> {
        Ok(self.get_json(&self.exercise_url(exercise_id)).await?)
    }

    async fn fetch_first(&self) -> Result<Exercise, AppError> {
        Ok(self.get_json(&self.first_url()).await?)
    }

    async fn fetch_next(&self, exercise_id: &str) -> Result<NextExercise, AppError> {
        Ok(self.get_json(&self.next_url(exercise_id)).await?)
    }
}

impl SolutionEvaluator for ExerciseApiClient {
    async fn evaluate(&self, exercise_id: &str, solution: &[Point]) -> Result<bool, AppError> {
        let url = self.evaluate_url(exercise_id);
        let body = EvaluateRequest { solution: solution.to_vec() };
        get_logger().debug(
            LogComponent::Infrastructure("ExerciseApiClient"),
            &format!("POST {} ({} points)", url, solution.len()),
        );
        let response = Request::post(&url)
            .json(&body)
            .map_err(|e| InfrastructureError::Serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| InfrastructureError::HttpRequestFailed(format!("POST {}: {}", url, e)))?;
        let verdict: EvaluationVerdict = Self::decode(response).await?;
        Ok(verdict.is_correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_follow_api_layout() {
        let client = ExerciseApiClient::new("http://localhost:8000/api/");
        assert_eq!(client.exercise_url("abc"), "http://localhost:8000/api/exercises/abc/");
        assert_eq!(client.first_url(), "http://localhost:8000/api/exercises/first/");
        assert_eq!(client.next_url("abc"), "http://localhost:8000/api/exercises/abc/next/");
        assert_eq!(client.evaluate_url("abc"), "http://localhost:8000/api/exercises/abc/evaluate/");
    }

    #[test]
    fn evaluate_body_shape() {
        let body = EvaluateRequest { solution: vec![Point::new("p1", 1.0, 2.0, 3.0)] };
        insta::assert_snapshot!(
            serde_json::to_string(&body).unwrap(),
            @r#"{"solution":[{"id":"p1","x":1.0,"y":2.0,"size":3.0}]}"#
        );
    }
}
