use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Single user record stored in the collection file.
///
/// Field order matters: it is the order records are written back to disk.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub age: i64,
}

impl User {
    pub fn new<S: Into<String>, E: Into<String>>(id: S, email: E, age: i64) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            age,
        }
    }
}

/// Decoding is lenient about keys: they match field names ignoring ASCII
/// case, later keys overwrite earlier ones, unknown keys are skipped, and a
/// missing or `null` field keeps its zero value.
impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(UserVisitor)
    }
}

struct UserVisitor;

impl<'de> Visitor<'de> for UserVisitor {
    type Value = User;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a user object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<User, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut user = User::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("id") {
                if let Some(id) = map.next_value::<Option<String>>()? {
                    user.id = id;
                }
            } else if key.eq_ignore_ascii_case("email") {
                if let Some(email) = map.next_value::<Option<String>>()? {
                    user.email = email;
                }
            } else if key.eq_ignore_ascii_case("age") {
                if let Some(age) = map.next_value::<Option<i64>>()? {
                    user.age = age;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(user)
    }
}
