use time::macros::date;
use uuid::Uuid;
use vessel::{Entity, Field};

pub const USER_ID: Uuid = Uuid::from_u128(0x7e57_ab1e_0000_4000_8000_0000_0000_0001);

/// Fields of an `address` composite.
pub fn address(street: &str, number: i32) -> Vec<Field> {
    vec![Field::new("street", street), Field::new("number", number)]
}

/// A user with a single address.
pub fn user() -> Entity {
    Entity::new("users")
        .with_key("id")
        .with(Field::new("id", USER_ID))
        .with(Field::new("name", "Alice"))
        .with(Field::new("age", 30))
        .with(Field::new("birthday", date!(1994 - 06 - 15)))
        .with(Field::structured("address", "address", address("Main", 10)))
}

/// A user with a collection of addresses stored in `column`.
pub fn user_with_addresses(column: &str, addresses: Vec<Vec<Field>>) -> Entity {
    Entity::new("users")
        .with_key("id")
        .with(Field::new("id", USER_ID))
        .with(Field::new("name", "Bob"))
        .with(Field::structured_collection(column, "address", addresses))
}
