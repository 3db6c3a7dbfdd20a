use crate::error::Result;
use crate::master::{LookupError, MasterFile};
use crate::protocol::{Message, RCode, Response};
use std::sync::Arc;

/// Builds the server's answer to one decoded request.
#[derive(Clone)]
pub struct Responder {
    master: Arc<dyn MasterFile>,
}

impl Responder {
    pub fn new(master: Arc<dyn MasterFile>) -> Self {
        Responder { master }
    }

    pub async fn respond(&self, message: &Message) -> Result<Response> {
        let query = match message {
            Message::Response(_) => {
                debug!("refuse response {} sent as a request", message.id());
                return Response::new(message.id(), message.query(), RCode::Refused);
            }
            Message::Query(query) => query,
        };
        match self.master.search(query.query()).await {
            Ok(records) => {
                let mut response = Response::new(query.id(), query.query(), RCode::NoError)?;
                records.answers.into_iter().for_each(|r| {
                    response.add_answer(r);
                });
                records.name_servers.into_iter().for_each(|r| {
                    response.add_name_server(r);
                });
                records.additionals.into_iter().for_each(|r| {
                    response.add_additional(r);
                });
                Ok(response)
            }
            Err(LookupError::NotFound(name)) => {
                debug!("no records for {}", name);
                Response::new(query.id(), query.query(), RCode::NameError)
            }
            Err(LookupError::Failure(e)) => {
                error!("lookup of {} failed: {}", query.query(), e);
                Response::new(query.id(), query.query(), RCode::ServerFailure)
            }
        }
    }
}
