use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: i64,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, age: i64, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
        }
    }
}

/// Columns a partial update may touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Age,
    Email,
}

impl UserField {
    pub fn column(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Age => "age",
            UserField::Email => "email",
        }
    }
}

/// New value for a single column of a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

/// Field update set for a partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(rename = "new_name")]
    pub name: Option<String>,
    #[serde(rename = "new_age")]
    pub age: Option<i64>,
    #[serde(rename = "new_email")]
    pub email: Option<String>,
}

impl UserUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.email.is_none()
    }

    /// Supplied fields in column order.
    pub fn assignments(&self) -> Vec<(UserField, FieldValue)> {
        let mut fields = Vec::with_capacity(3);
        if let Some(name) = &self.name {
            fields.push((UserField::Name, FieldValue::Text(name.clone())));
        }
        if let Some(age) = self.age {
            fields.push((UserField::Age, FieldValue::Integer(age)));
        }
        if let Some(email) = &self.email {
            fields.push((UserField::Email, FieldValue::Text(email.clone())));
        }
        fields
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.assignments()
            .into_iter()
            .map(|(field, _)| field.column())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(i64),
    /// The email is already taken; nothing was written.
    DuplicateEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NoFieldsGiven,
    NotFound,
}
