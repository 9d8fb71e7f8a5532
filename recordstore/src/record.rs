use serde::{Deserialize, Serialize};

pub type RecordId = u64;

/// One directory entry. Every field is required; the persisted object must
/// carry exactly these seven keys.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub id: RecordId,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub organization: String,
    #[serde(rename = "phoneWork")]
    pub phone_work: String,
    #[serde(rename = "phonePersonal")]
    pub phone_personal: String,
}

/// A complete set of text fields waiting for an id.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct NewRecord {
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub organization: String,
    pub phone_work: String,
    pub phone_personal: String,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Field {
    Surname,
    Name,
    Patronymic,
    Organization,
    PhoneWork,
    PhonePersonal,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Surname,
        Field::Name,
        Field::Patronymic,
        Field::Organization,
        Field::PhoneWork,
        Field::PhonePersonal,
    ];

    /// Key used in the persisted file.
    pub fn key(self) -> &'static str {
        match self {
            Field::Surname => "surname",
            Field::Name => "name",
            Field::Patronymic => "patronymic",
            Field::Organization => "organization",
            Field::PhoneWork => "phoneWork",
            Field::PhonePersonal => "phonePersonal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Surname => "Surname",
            Field::Name => "Name",
            Field::Patronymic => "Patronymic",
            Field::Organization => "Organization",
            Field::PhoneWork => "Work phone",
            Field::PhonePersonal => "Personal phone",
        }
    }

    /// Command-line flag name, without the leading dashes.
    pub fn flag(self) -> &'static str {
        match self {
            Field::Surname => "surname",
            Field::Name => "name",
            Field::Patronymic => "patronymic",
            Field::Organization => "organization",
            Field::PhoneWork => "phone-work",
            Field::PhonePersonal => "phone-personal",
        }
    }
}

/// Same shape as a record with every text field optional.
///
/// As a [`Query`] the present fields must all match exactly; as a
/// [`RecordPatch`] the present fields overwrite the stored values.
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub struct PartialRecord {
    pub surname: Option<String>,
    pub name: Option<String>,
    pub patronymic: Option<String>,
    pub organization: Option<String>,
    pub phone_work: Option<String>,
    pub phone_personal: Option<String>,
}

pub type Query = PartialRecord;
pub type RecordPatch = PartialRecord;

impl PartialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Surname => self.surname.as_deref(),
            Field::Name => self.name.as_deref(),
            Field::Patronymic => self.patronymic.as_deref(),
            Field::Organization => self.organization.as_deref(),
            Field::PhoneWork => self.phone_work.as_deref(),
            Field::PhonePersonal => self.phone_personal.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Present fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Surname => &mut self.surname,
            Field::Name => &mut self.name,
            Field::Patronymic => &mut self.patronymic,
            Field::Organization => &mut self.organization,
            Field::PhoneWork => &mut self.phone_work,
            Field::PhonePersonal => &mut self.phone_personal,
        }
    }
}

impl Record {
    pub fn from_new(id: RecordId, fields: NewRecord) -> Self {
        Self {
            id,
            surname: fields.surname,
            name: fields.name,
            patronymic: fields.patronymic,
            organization: fields.organization,
            phone_work: fields.phone_work,
            phone_personal: fields.phone_personal,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Surname => &self.surname,
            Field::Name => &self.name,
            Field::Patronymic => &self.patronymic,
            Field::Organization => &self.organization,
            Field::PhoneWork => &self.phone_work,
            Field::PhonePersonal => &self.phone_personal,
        }
    }

    pub fn matches(&self, query: &Query) -> bool {
        query.iter().all(|(field, value)| self.get(field) == value)
    }

    /// Overwrites every field present in `patch`. The id is never touched.
    pub fn apply(&mut self, patch: &RecordPatch) {
        for (field, value) in patch.iter() {
            *self.get_mut(field) = value.to_string();
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Surname => &mut self.surname,
            Field::Name => &mut self.name,
            Field::Patronymic => &mut self.patronymic,
            Field::Organization => &mut self.organization,
            Field::PhoneWork => &mut self.phone_work,
            Field::PhonePersonal => &mut self.phone_personal,
        }
    }
}

impl NewRecord {
    /// Builds a complete candidate from a partial one, or `None` if any field
    /// is missing.
    pub fn from_partial(partial: PartialRecord) -> Option<Self> {
        Some(Self {
            surname: partial.surname?,
            name: partial.name?,
            patronymic: partial.patronymic?,
            organization: partial.organization?,
            phone_work: partial.phone_work?,
            phone_personal: partial.phone_personal?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            id: 7,
            surname: "Ivanov".to_string(),
            name: "Ivan".to_string(),
            patronymic: "Ivanovich".to_string(),
            organization: "Acme".to_string(),
            phone_work: "111".to_string(),
            phone_personal: "222".to_string(),
        }
    }

    #[test]
    fn serializes_fields_in_persisted_order() {
        let json = serde_json::to_string(&record()).unwrap();

        assert_eq!(
            json,
            r#"{"id":7,"surname":"Ivanov","name":"Ivan","patronymic":"Ivanovich","organization":"Acme","phoneWork":"111","phonePersonal":"222"}"#
        );
    }

    #[test]
    fn rejects_incomplete_record() {
        let json = r#"{"id":1,"surname":"Ivanov","name":"Ivan","patronymic":"","organization":"","phoneWork":""}"#;

        assert!(serde_json::from_str::<Record>(json).is_err());
    }

    #[test]
    fn rejects_unknown_field() {
        let json = r#"{"id":1,"surname":"","name":"","patronymic":"","organization":"","phoneWork":"","phonePersonal":"","email":""}"#;

        assert!(serde_json::from_str::<Record>(json).is_err());
    }

    #[test]
    fn accepts_empty_strings() {
        let json = r#"{"id":1,"surname":"","name":"","patronymic":"","organization":"","phoneWork":"","phonePersonal":""}"#;

        let parsed: Record = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.surname, "");
    }

    #[test]
    fn flags_are_kebab_case_keys() {
        for field in Field::ALL {
            let from_key: String = field
                .key()
                .chars()
                .flat_map(|c| if c.is_ascii_uppercase() { vec!['-', c.to_ascii_lowercase()] } else { vec![c] })
                .collect();
            assert_eq!(field.flag(), from_key);
        }
    }

    #[test]
    fn matches_requires_every_query_field() {
        let query = Query::new().with(Field::Surname, "Ivanov").with(Field::Organization, "Acme");
        assert!(record().matches(&query));

        let query = query.with(Field::PhoneWork, "999");
        assert!(!record().matches(&query));
    }

    #[test]
    fn matches_is_exact_and_case_sensitive() {
        assert!(!record().matches(&Query::new().with(Field::Surname, "Ivan")));
        assert!(!record().matches(&Query::new().with(Field::Surname, "ivanov")));
        assert!(!record().matches(&Query::new().with(Field::Surname, "Ivanov ")));
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let mut updated = record();
        updated.apply(&RecordPatch::new().with(Field::PhonePersonal, "333"));

        assert_eq!(updated.phone_personal, "333");
        assert_eq!(Record { phone_personal: "222".to_string(), ..updated }, record());
    }

    #[test]
    fn partial_iter_follows_field_order() {
        let partial = PartialRecord::new().with(Field::PhoneWork, "1").with(Field::Surname, "S");

        let fields: Vec<Field> = partial.iter().map(|(field, _)| field).collect();

        assert_eq!(fields, vec![Field::Surname, Field::PhoneWork]);
        assert!(!partial.is_empty());
        assert!(PartialRecord::new().is_empty());
    }

    #[test]
    fn new_record_from_partial_requires_all_fields() {
        let mut partial = PartialRecord::new();
        for field in Field::ALL.into_iter().take(5) {
            partial.set(field, "x");
        }
        assert!(NewRecord::from_partial(partial.clone()).is_none());

        partial.set(Field::PhonePersonal, "");
        let complete = NewRecord::from_partial(partial).unwrap();
        assert_eq!(complete.phone_personal, "");
    }
}
