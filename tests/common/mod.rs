//! Schema shared by the integration tests.

#![allow(dead_code)]

use layercfg::{Record, Schema};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Internal {
    pub value: i64,
}

impl Schema for Internal {
    fn schema() -> Record<Self> {
        Record::<Self>::new().leaf(
            "Value",
            "value",
            Some("struct internal int field"),
            |c| &c.value,
            |c| &mut c.value,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestConfiguration {
    pub int_field_1: i64,
    pub int_field_2: i64,
    pub string_field_1: String,
    pub string_field_2: String,
    pub bool_field_1: bool,
    pub bool_field_2: bool,
    pub float64_field_1: f64,
    pub float64_field_2: f64,
    pub secret: String,
    pub internal: Internal,
}

pub fn defaults() -> TestConfiguration {
    TestConfiguration {
        int_field_1: 123,
        int_field_2: -123,
        string_field_1: "some string 1".to_string(),
        string_field_2: "some string 2".to_string(),
        bool_field_1: true,
        bool_field_2: false,
        float64_field_1: 123.123,
        float64_field_2: -123.123,
        secret: "hunter2".to_string(),
        internal: Internal { value: 9832 },
    }
}

impl Schema for TestConfiguration {
    fn schema() -> Record<Self> {
        Record::<Self>::new()
            .leaf("IntField1", "int_field_1", Some("int field # 1"), |c| &c.int_field_1, |c| {
                &mut c.int_field_1
            })
            .leaf("IntField2", "int_field_2", Some("int field # 2"), |c| &c.int_field_2, |c| {
                &mut c.int_field_2
            })
            .leaf(
                "StringField1",
                "string_field_1",
                Some("string field # 1"),
                |c| &c.string_field_1,
                |c| &mut c.string_field_1,
            )
            .leaf(
                "StringField2",
                "string_field_2",
                Some("string field # 2"),
                |c| &c.string_field_2,
                |c| &mut c.string_field_2,
            )
            .leaf(
                "BoolField1",
                "bool_field_1",
                Some("bool field # 1"),
                |c| &c.bool_field_1,
                |c| &mut c.bool_field_1,
            )
            .leaf(
                "BoolField2",
                "bool_field_2",
                Some("bool field # 2"),
                |c| &c.bool_field_2,
                |c| &mut c.bool_field_2,
            )
            .leaf(
                "Float64Field1",
                "float64_field_1",
                Some("float64 field # 1"),
                |c| &c.float64_field_1,
                |c| &mut c.float64_field_1,
            )
            .leaf(
                "Float64Field2",
                "float64_field_2",
                Some("float64 field # 2"),
                |c| &c.float64_field_2,
                |c| &mut c.float64_field_2,
            )
            .leaf("Secret", "secret", None, |c| &c.secret, |c| &mut c.secret)
            .nested("Internal", "internal", |c| &c.internal, |c| &mut c.internal)
    }
}

pub fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}
