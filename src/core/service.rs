use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Service not found: {0}")]
    NotFound(&'static str),
    #[error("Service already registered: {0}")]
    AlreadyRegistered(&'static str),
}

pub trait Service: Any + Send + Sync {
    fn name(&self) -> &'static str;
}

struct Entry {
    name: &'static str,
    service: Box<dyn Any + Send + Sync>,
}

/// 按类型注册的服务表，每种类型最多一个实例
#[derive(Default)]
pub struct ServiceRegistry {
    services: FxHashMap<TypeId, Entry>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: Service>(&mut self, service: S) -> Result<()> {
        let type_id = TypeId::of::<S>();
        let name = service.name();
        if self.services.contains_key(&type_id) {
            return Err(ServiceError::AlreadyRegistered(name));
        }
        tracing::debug!(service = name, "service registered");
        self.services.insert(
            type_id,
            Entry {
                name,
                service: Box::new(service),
            },
        );
        Ok(())
    }

    pub fn get<S: Service>(&self) -> Option<&S> {
        self.services
            .get(&TypeId::of::<S>())
            .and_then(|e| e.service.downcast_ref::<S>())
    }

    pub fn get_mut<S: Service>(&mut self) -> Option<&mut S> {
        self.services
            .get_mut(&TypeId::of::<S>())
            .and_then(|e| e.service.downcast_mut::<S>())
    }

    /// 同 get，找不到时给出带类型名的错误
    pub fn require<S: Service>(&self) -> Result<&S> {
        self.get::<S>()
            .ok_or(ServiceError::NotFound(std::any::type_name::<S>()))
    }

    pub fn contains<S: Service>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<S>())
    }

    pub fn remove<S: Service>(&mut self) -> Option<S> {
        self.services
            .remove(&TypeId::of::<S>())
            .and_then(|e| e.service.downcast::<S>().ok())
            .map(|boxed| *boxed)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.services.values().map(|e| e.name).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/service.rs"]
mod tests;
