//! The chat transport capability: either one HTTP exchange per message or a
//! long-lived socket. Feedback always goes over HTTP.

use std::rc::Rc;

use chat_types::config::TransportKind;

use crate::ports::{ChatHttpPort, SocketPort};

#[derive(Clone)]
pub enum Transport {
    HttpPolling {
        http: Rc<dyn ChatHttpPort>,
    },
    Socket {
        http: Rc<dyn ChatHttpPort>,
        socket: Rc<dyn SocketPort>,
    },
}

impl Transport {
    pub fn kind(&self) -> TransportKind {
        match self {
            Transport::HttpPolling { .. } => TransportKind::HttpPolling,
            Transport::Socket { .. } => TransportKind::Socket,
        }
    }

    pub fn http(&self) -> Rc<dyn ChatHttpPort> {
        match self {
            Transport::HttpPolling { http } | Transport::Socket { http, .. } => http.clone(),
        }
    }

    pub fn socket(&self) -> Option<Rc<dyn SocketPort>> {
        match self {
            Transport::HttpPolling { .. } => None,
            Transport::Socket { socket, .. } => Some(socket.clone()),
        }
    }
}
