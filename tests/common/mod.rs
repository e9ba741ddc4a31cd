#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use json_lib_rs::bean::{JsonBean, PropertyDescriptor};
use json_lib_rs::convert::{JsonConfig, Value};
use json_lib_rs::error::JsonError;

pub fn setup_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default, Debug)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub nickname: Option<String>,
    pub session_token: String,
}

impl JsonBean for Person {
    fn type_name(&self) -> &str {
        "Person"
    }

    fn descriptors(&self) -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::new("name", "String"),
            PropertyDescriptor::new("age", "i64"),
            PropertyDescriptor::new("nickname", "String"),
            PropertyDescriptor::new("sessionToken", "String").transient(),
        ]
    }

    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name.as_str())),
            "age" => Some(Value::from(self.age)),
            "nickname" => Some(
                self.nickname
                    .as_deref()
                    .map(Value::from)
                    .unwrap_or(Value::Null),
            ),
            "sessionToken" => Some(Value::from(self.session_token.as_str())),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), JsonError> {
        match (name, value) {
            ("name", Value::Str(s)) => self.name = s,
            ("name", Value::Null) => self.name = String::new(),
            ("age", Value::Int(n)) => self.age = n,
            ("nickname", Value::Str(s)) => self.nickname = Some(s),
            ("nickname", Value::Null) => self.nickname = None,
            ("sessionToken", Value::Str(s)) => self.session_token = s,
            (other, value) => {
                return Err(JsonError::Structural(format!(
                    "cannot set '{other}' from {}",
                    value.type_name()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Default, Debug)]
pub struct Counter {
    pub count: i64,
    pub enabled: bool,
}

impl JsonBean for Counter {
    fn type_name(&self) -> &str {
        "Counter"
    }

    fn descriptors(&self) -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::new("count", "i64"),
            PropertyDescriptor::new("enabled", "bool"),
        ]
    }

    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "count" => Some(Value::from(self.count)),
            "enabled" => Some(Value::from(self.enabled)),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), JsonError> {
        match (name, value) {
            ("count", Value::Int(n)) => self.count = n,
            ("enabled", Value::Bool(b)) => self.enabled = b,
            (other, value) => {
                return Err(JsonError::Structural(format!(
                    "cannot set '{other}' from {}",
                    value.type_name()
                )));
            }
        }
        Ok(())
    }
}

pub fn person_config() -> JsonConfig {
    JsonConfig::new()
        .with_root_class("Person")
        .register_bean_class("Person", || {
            Rc::new(RefCell::new(Person::default())) as Rc<RefCell<dyn JsonBean>>
        })
}

pub fn counter_config() -> JsonConfig {
    JsonConfig::new()
        .with_root_class("Counter")
        .register_bean_class("Counter", || {
            Rc::new(RefCell::new(Counter::default())) as Rc<RefCell<dyn JsonBean>>
        })
}
