use super::*;

struct TestService {
    value: i32,
}

impl Service for TestService {
    fn name(&self) -> &'static str {
        "TestService"
    }
}

struct AnotherService {
    data: String,
}

impl Service for AnotherService {
    fn name(&self) -> &'static str {
        "AnotherService"
    }
}

#[test]
fn test_register_and_get() {
    let mut registry = ServiceRegistry::new();
    registry.register(TestService { value: 42 }).unwrap();

    let retrieved = registry.get::<TestService>().unwrap();
    assert_eq!(retrieved.value, 42);
}

#[test]
fn test_get_mut() {
    let mut registry = ServiceRegistry::new();
    registry.register(TestService { value: 10 }).unwrap();

    registry.get_mut::<TestService>().unwrap().value = 20;

    assert_eq!(registry.get::<TestService>().unwrap().value, 20);
}

#[test]
fn test_multiple_services() {
    let mut registry = ServiceRegistry::new();
    registry.register(TestService { value: 1 }).unwrap();
    registry
        .register(AnotherService {
            data: "hello".to_string(),
        })
        .unwrap();

    assert_eq!(registry.get::<TestService>().unwrap().value, 1);
    assert_eq!(registry.get::<AnotherService>().unwrap().data, "hello");
    assert_eq!(registry.names(), vec!["AnotherService", "TestService"]);
}

#[test]
fn test_duplicate_registration() {
    let mut registry = ServiceRegistry::new();
    registry.register(TestService { value: 1 }).unwrap();

    let result = registry.register(TestService { value: 2 });
    assert!(matches!(
        result,
        Err(ServiceError::AlreadyRegistered("TestService"))
    ));
}

#[test]
fn test_require_missing_service() {
    let registry = ServiceRegistry::new();
    assert!(registry.get::<TestService>().is_none());
    assert!(matches!(
        registry.require::<TestService>(),
        Err(ServiceError::NotFound(_))
    ));
}

#[test]
fn test_remove_returns_service() {
    let mut registry = ServiceRegistry::new();
    registry.register(TestService { value: 7 }).unwrap();

    let removed = registry.remove::<TestService>().unwrap();
    assert_eq!(removed.value, 7);
    assert!(!registry.contains::<TestService>());
}
