#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # JSON-lib for Rust

 A JSON object model with a bidirectional conversion engine: arbitrary
 object graphs (maps, arrays, beans) serialize into a JSON node tree,
 and node trees materialize back into untyped values or typed beans.
 The parser is deliberately tolerant of real-world JavaScript-flavored
 input, and every conversion step can be customized through pluggable
 processors.

 ## Core Concepts

 - **JsonNode:** The in-memory JSON value: null, boolean, number,
   string, function literal, array or insertion-ordered object.
 - **Value:** What callers hand to the engine: scalars plus shared
   arrays, maps and beans. Shared composites make reference cycles
   expressible, and the engine detects them.
 - **JsonBean:** The bean capability. A type implements it to expose
   named, typed properties; `DynaBean` is the generic ordered record
   used when no class is registered.
 - **JsonConfig:** Per-call policy: cycle strategy, array mode,
   exclusions, class map, processors, listeners and feature flags.

 ## Usage

 ```rust
 use json_lib_rs::convert::{to_json, to_value, JsonConfig, Value};
 use json_lib_rs::parser::parse;

 fn main() -> Result<(), json_lib_rs::error::JsonError> {
     // Tolerant parsing: unquoted keys, single quotes, trailing commas.
     let node = parse("{name: 'Ada', tags: [1, 2,], }")?;
     assert_eq!(node.to_text(0), r#"{"name":"Ada","tags":[1,2]}"#);

     // Serialize a map built in code.
     let map = Value::new_map();
     map.insert("greeting", Value::from("hello"))?;
     let node = to_json(&map, &JsonConfig::new())?;
     assert_eq!(node.to_text(0), r#"{"greeting":"hello"}"#);

     // And materialize it back.
     let value = to_value(&node, &JsonConfig::new())?;
     let Value::Bean(bean) = value else { unreachable!() };
     assert_eq!(bean.borrow().get("greeting"), Some(Value::from("hello")));
     Ok(())
 }
 ```
*/

pub mod bean;
pub mod convert;
pub mod error;
pub mod node;
pub mod parser;

pub use error::JsonError;
pub use node::JsonNode;
