use std::fmt;

/// A JavaScript function literal carried through the node tree.
///
/// The body is kept as raw text; the engine never evaluates it. Rendering
/// reproduces the `function(a,b){...}` form without quoting.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonFunction {
    params: Vec<String>,
    body: String,
}

impl JsonFunction {
    pub fn new<I, S>(params: I, body: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        JsonFunction {
            params: params.into_iter().map(Into::into).collect(),
            body: body.to_owned(),
        }
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for JsonFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function({}){{{}}}", self.params.join(","), self.body)
    }
}
