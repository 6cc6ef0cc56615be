use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tutorials_http::{Ack, ClientError, TutorialApi};
use tutorials_kernel::{Navigator, Route, Tutorial, TutorialId, TutorialPayload};

/// A call received by [`MockTutorialApi`], with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAll,
    Get(TutorialId),
    Create(TutorialPayload),
    Update(TutorialId, Tutorial),
    Delete(TutorialId),
    DeleteAll,
    FindByTitle(String),
}

/// Operation names accepted by [`MockTutorialApi::fail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    GetAll,
    Get,
    Create,
    Update,
    Delete,
    DeleteAll,
    FindByTitle,
}

/// Scriptable in-memory stand-in for the REST client.
pub struct MockTutorialApi {
    tutorials: Mutex<Vec<Tutorial>>,
    failing: Mutex<HashSet<Op>>,
    calls: Mutex<Vec<Call>>,
    created_id: TutorialId,
}

impl MockTutorialApi {
    pub fn new(tutorials: Vec<Tutorial>) -> Self {
        Self {
            tutorials: Mutex::new(tutorials),
            failing: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            created_id: TutorialId::from("1337"),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Make every later call to `op` fail with a 500.
    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    pub fn set_tutorials(&self, tutorials: Vec<Tutorial>) {
        *self.tutorials.lock().unwrap() = tutorials;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    fn record(&self, call: Call, op: Op) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(&op) {
            return Err(ClientError::Api {
                status: 500,
                body: "Error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TutorialApi for MockTutorialApi {
    async fn get_all(&self) -> Result<Vec<Tutorial>, ClientError> {
        self.record(Call::GetAll, Op::GetAll)?;
        Ok(self.tutorials.lock().unwrap().clone())
    }

    async fn get(&self, id: &TutorialId) -> Result<Tutorial, ClientError> {
        self.record(Call::Get(id.clone()), Op::Get)?;
        self.tutorials
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id.as_ref() == Some(id))
            .cloned()
            .ok_or_else(|| ClientError::Api {
                status: 404,
                body: format!("Cannot find Tutorial with id={id}."),
            })
    }

    async fn create(&self, payload: &TutorialPayload) -> Result<Tutorial, ClientError> {
        self.record(Call::Create(payload.clone()), Op::Create)?;
        let created = Tutorial {
            id: Some(self.created_id.clone()),
            title: payload.title.clone(),
            description: payload.description.clone(),
            published: payload.published,
        };
        self.tutorials.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &TutorialId, tutorial: &Tutorial) -> Result<Ack, ClientError> {
        self.record(Call::Update(id.clone(), tutorial.clone()), Op::Update)?;
        Ok(json!({"message": "The tutorial was updated successfully!"}))
    }

    async fn delete(&self, id: &TutorialId) -> Result<Ack, ClientError> {
        self.record(Call::Delete(id.clone()), Op::Delete)?;
        self.tutorials
            .lock()
            .unwrap()
            .retain(|t| t.id.as_ref() != Some(id));
        Ok(json!({"message": "Tutorial was deleted successfully!"}))
    }

    async fn delete_all(&self) -> Result<Ack, ClientError> {
        self.record(Call::DeleteAll, Op::DeleteAll)?;
        self.tutorials.lock().unwrap().clear();
        Ok(json!([]))
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Tutorial>, ClientError> {
        self.record(Call::FindByTitle(title.to_string()), Op::FindByTitle)?;
        Ok(self
            .tutorials
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.title.contains(title))
            .cloned()
            .collect())
    }
}

/// Navigator that remembers every route it was asked to show.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

pub fn tutorial(id: &str, title: &str, published: bool) -> Tutorial {
    Tutorial {
        id: Some(TutorialId::from(id)),
        title: title.to_string(),
        description: format!("This is {}.", title.to_lowercase()),
        published,
    }
}
