use serde::de::IgnoredAny;
use uuid::Uuid;

use crate::domain::{error::DomainError, models::planner::Resource, services::api_service::ApiClient};

/// CRUD access to the planner collections (dates, events, gifts, ...)
pub struct PlannerUsecase<A: ApiClient> {
    api_client: A,
}

impl<A: ApiClient> PlannerUsecase<A> {
    pub fn new(api_client: A) -> Self {
        Self { api_client }
    }

    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, DomainError> {
        self.api_client.get(R::COLLECTION).await
    }

    pub async fn get<R: Resource>(&self, id: Uuid) -> Result<R, DomainError> {
        self.api_client.get(&item_path::<R>(id)).await
    }

    pub async fn create<R: Resource>(&self, resource: &R) -> Result<R, DomainError> {
        self.api_client.post(R::COLLECTION, resource).await
    }

    pub async fn update<R: Resource>(&self, id: Uuid, resource: &R) -> Result<R, DomainError> {
        self.api_client.put(&item_path::<R>(id), resource).await
    }

    /// Whatever payload the backend returns for a deletion is discarded
    pub async fn delete<R: Resource>(&self, id: Uuid) -> Result<(), DomainError> {
        self.api_client
            .delete::<IgnoredAny>(&item_path::<R>(id))
            .await
            .map(|_| ())
    }
}

fn item_path<R: Resource>(id: Uuid) -> String {
    format!("{}/{}", R::COLLECTION, id)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rstest::*;
    use serde::{Serialize, de::DeserializeOwned};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::models::planner::{Gift, Reminder};

    const TEST_ID: &str = "00000000-0000-0000-0000-000000000001";

    // mock api: records calls and answers from a fixed payload
    struct MockApiClient {
        payload: Value,
        calls: Mutex<Vec<String>>,
    }

    impl MockApiClient {
        fn answering(payload: Value) -> Self {
            Self {
                payload,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record<T: DeserializeOwned>(&self, call: String) -> Result<T, DomainError> {
            self.calls.lock().unwrap().push(call);
            if self.payload.is_null() {
                return Err(DomainError::BackendLogic("No encontrado".to_string()));
            }
            serde_json::from_value(self.payload.clone()).map_err(|_| DomainError::MalformedResponse)
        }
    }

    #[async_trait]
    impl ApiClient for MockApiClient {
        async fn get<T>(&self, path: &str) -> Result<T, DomainError>
        where
            T: DeserializeOwned + Send,
        {
            self.record(format!("GET {path}"))
        }

        async fn post<B, T>(&self, path: &str, _body: &B) -> Result<T, DomainError>
        where
            B: Serialize + Sync,
            T: DeserializeOwned + Send,
        {
            self.record(format!("POST {path}"))
        }

        async fn put<B, T>(&self, path: &str, _body: &B) -> Result<T, DomainError>
        where
            B: Serialize + Sync,
            T: DeserializeOwned + Send,
        {
            self.record(format!("PUT {path}"))
        }

        async fn delete<T>(&self, path: &str) -> Result<T, DomainError>
        where
            T: DeserializeOwned + Send,
        {
            self.record(format!("DELETE {path}"))
        }
    }

    fn reminder() -> Reminder {
        Reminder {
            id: Uuid::parse_str(TEST_ID).unwrap(),
            title: "Comprar flores".to_string(),
            remind_at: Utc.with_ymd_and_hms(2026, 2, 14, 9, 0, 0).unwrap(),
            note: None,
            done: false,
        }
    }

    #[fixture]
    fn reminder_usecase() -> PlannerUsecase<MockApiClient> {
        let payload = serde_json::to_value(reminder()).unwrap();
        PlannerUsecase::new(MockApiClient::answering(payload))
    }

    #[tokio::test]
    async fn test_list_uses_collection_path() {
        let payload = json!([serde_json::to_value(reminder()).unwrap()]);
        let usecase = PlannerUsecase::new(MockApiClient::answering(payload));

        let reminders: Vec<Reminder> = usecase.list().await.unwrap();

        assert_eq!(reminders, vec![reminder()]);
        assert_eq!(*usecase.api_client.calls.lock().unwrap(), vec!["GET reminders"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_item_operations_use_item_path(reminder_usecase: PlannerUsecase<MockApiClient>) {
        let id = Uuid::parse_str(TEST_ID).unwrap();

        let fetched: Reminder = reminder_usecase.get(id).await.unwrap();
        reminder_usecase.create(&fetched).await.unwrap();
        reminder_usecase.update(id, &fetched).await.unwrap();
        reminder_usecase.delete::<Reminder>(id).await.unwrap();

        let calls = reminder_usecase.api_client.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                format!("GET reminders/{TEST_ID}"),
                "POST reminders".to_string(),
                format!("PUT reminders/{TEST_ID}"),
                format!("DELETE reminders/{TEST_ID}"),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_wrong_payload_shape_negative(reminder_usecase: PlannerUsecase<MockApiClient>) {
        let result = reminder_usecase.list::<Gift>().await;
        assert!(matches!(result, Err(DomainError::MalformedResponse)));
    }

    #[tokio::test]
    async fn test_backend_error_is_propagated() {
        let usecase = PlannerUsecase::new(MockApiClient::answering(Value::Null));
        let result = usecase.delete::<Gift>(Uuid::parse_str(TEST_ID).unwrap()).await;

        match result {
            Err(DomainError::BackendLogic(message)) => assert_eq!(message, "No encontrado"),
            other => panic!("expected backend logic error, got {other:?}"),
        }
    }
}
