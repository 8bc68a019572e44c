use oso::{Oso, PolarClass};

use crate::auth::User;
use crate::entities::Account;

pub fn new() -> Result<Oso, oso::OsoError> {
    let mut o = Oso::new();

    o.register_class(User::get_polar_class())?;
    o.register_class(Account::get_polar_class())?;

    o.load_str(include_str!("rules.polar"))?;

    Ok(o)
}

#[cfg(test)]
fn account_for(user: &User) -> Account {
    let mut account = Account::new(
        "ana@example.com".into(),
        "Ana".into(),
        "".into(),
        None,
        user.roles.clone(),
    );
    account.id = user.id;
    account
}

#[test]
fn account_owner_role_test() {
    use uuid::Uuid;

    let authorizor = new().unwrap();

    let owner = User {
        id: Uuid::new_v4(),
        roles: vec!["member".into()],
        session_id: None,
    };
    let account = account_for(&owner);

    let result = authorizor.query_rule("has_role", (owner.clone(), "owner", account.clone()));
    assert!(result.unwrap().next().unwrap().is_ok());

    let result = authorizor.is_allowed(owner.clone(), "read", account.clone());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(owner.clone(), "read_stats", account.clone());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(owner.clone(), "update_favorites", account.clone());
    assert_eq!(result.unwrap(), true);
}

#[test]
fn stranger_is_denied_test() {
    use uuid::Uuid;

    let authorizor = new().unwrap();

    let owner = User {
        id: Uuid::new_v4(),
        roles: vec!["member".into()],
        session_id: None,
    };
    let stranger = User {
        id: Uuid::new_v4(),
        roles: vec!["member".into()],
        session_id: None,
    };
    let account = account_for(&owner);

    let result = authorizor.query_rule("has_role", (stranger.clone(), "owner", account.clone()));
    assert!(result.unwrap().next().is_none());

    let result = authorizor.is_allowed(stranger.clone(), "read_stats", account.clone());
    assert_eq!(result.unwrap(), false);

    let result = authorizor.is_allowed(stranger.clone(), "update_favorites", account.clone());
    assert_eq!(result.unwrap(), false);
}

#[test]
fn system_role_test() {
    use uuid::Uuid;

    let authorizor = new().unwrap();

    let owner = User {
        id: Uuid::new_v4(),
        roles: vec!["member".into()],
        session_id: None,
    };
    let system = User::new_system_user();
    let account = account_for(&owner);

    let result = authorizor.query_rule("has_role", (system.clone(), "system", account.clone()));
    assert!(result.unwrap().next().unwrap().is_ok());

    let result = authorizor.is_allowed(system.clone(), "read_stats", account.clone());
    assert_eq!(result.unwrap(), true);

    // system users read but never edit someone else's favorites
    let result = authorizor.is_allowed(system.clone(), "update_favorites", account.clone());
    assert_eq!(result.unwrap(), false);
}
