use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum Section {
    A,
    B,
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Pass,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marks {
    pub mark1: i32,
    pub mark2: i32,
    pub mark3: i32,
}

impl Marks {
    pub fn new(mark1: i32, mark2: i32, mark3: i32) -> Self {
        Self {
            mark1,
            mark2,
            mark3,
        }
    }

    pub fn as_array(&self) -> [i32; 3] {
        [self.mark1, self.mark2, self.mark3]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorecard {
    pub total: i32,
    pub average: f64,
    pub outcome: Outcome,
}

/// Raw create request. Every field is optional so that missing values reach
/// the validator instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(alias = "dob")]
    pub date_of_birth: Option<NaiveDate>,
    pub section: Option<String>,
    pub gender: Option<String>,
    #[serde(alias = "marks1")]
    pub mark1: Option<i64>,
    #[serde(alias = "marks2")]
    pub mark2: Option<i64>,
    #[serde(alias = "marks3")]
    pub mark3: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarksInput {
    #[serde(alias = "marks1")]
    pub mark1: Option<i64>,
    #[serde(alias = "marks2")]
    pub mark2: Option<i64>,
    #[serde(alias = "marks3")]
    pub mark3: Option<i64>,
}

impl MarksInput {
    pub fn new(mark1: i64, mark2: i64, mark3: i64) -> Self {
        Self {
            mark1: Some(mark1),
            mark2: Some(mark2),
            mark3: Some(mark3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentRecord {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub section: Section,
    pub gender: Gender,
    pub mark1: i32,
    pub mark2: i32,
    pub mark3: i32,
    pub total: i32,
    pub average: f64,
    pub outcome: Outcome,
}

impl NewStudentRecord {
    pub fn with_id(self, id: i64) -> StudentRecord {
        StudentRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            section: self.section,
            gender: self.gender,
            mark1: self.mark1,
            mark2: self.mark2,
            mark3: self.mark3,
            total: self.total,
            average: self.average,
            outcome: self.outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub section: Section,
    pub gender: Gender,
    pub mark1: i32,
    pub mark2: i32,
    pub mark3: i32,
    pub total: i32,
    pub average: f64,
    pub outcome: Outcome,
}

impl StudentRecord {
    pub fn marks(&self) -> Marks {
        Marks::new(self.mark1, self.mark2, self.mark3)
    }

    pub fn apply_scores(&mut self, marks: Marks, scorecard: Scorecard) {
        self.mark1 = marks.mark1;
        self.mark2 = marks.mark2;
        self.mark3 = marks.mark3;
        self.total = scorecard.total;
        self.average = scorecard.average;
        self.outcome = scorecard.outcome;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_text_forms() {
        assert_eq!(Outcome::Pass.to_string(), "PASS");
        assert_eq!("FAIL".parse::<Outcome>().unwrap(), Outcome::Fail);
        assert_eq!("B".parse::<Section>().unwrap(), Section::B);
        assert!("b".parse::<Section>().is_err());
        assert!("X".parse::<Gender>().is_err());
    }

    #[test]
    fn test_input_accepts_legacy_field_names() {
        let input: StudentInput = serde_json::from_str(
            r#"{"firstName":"John","lastName":"Doe","dob":"2008-03-01",
                "section":"A","gender":"M","marks1":80,"marks2":40,"marks3":36}"#,
        )
        .unwrap();
        assert_eq!(input.date_of_birth, NaiveDate::from_ymd_opt(2008, 3, 1));
        assert_eq!(input.mark1, Some(80));
        assert_eq!(input.mark3, Some(36));
    }

    #[test]
    fn test_missing_fields_deserialize_as_none() {
        let marks: MarksInput = serde_json::from_str(r#"{"mark1":50}"#).unwrap();
        assert_eq!(marks.mark1, Some(50));
        assert!(marks.mark2.is_none() && marks.mark3.is_none());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = NewStudentRecord {
            first_name: "John".into(),
            last_name: "Doe".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2008, 3, 1).unwrap(),
            section: Section::A,
            gender: Gender::M,
            mark1: 80,
            mark2: 40,
            mark3: 36,
            total: 156,
            average: 52.0,
            outcome: Outcome::Pass,
        }
        .with_id(7);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["dateOfBirth"], "2008-03-01");
        assert_eq!(json["outcome"], "PASS");
    }
}
