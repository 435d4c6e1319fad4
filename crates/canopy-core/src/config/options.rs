use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A free-form option document handed to a client-side graph library.
///
/// Keys are addressed with dotted paths (`layout.hierarchical.direction`). The document is always
/// an object at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisOptions(Value);

impl Default for VisOptions {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl From<Value> for VisOptions {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl VisOptions {
    /// Non-object values are replaced by an empty object.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => Self(value),
            _ => Self::default(),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_object().is_none_or(Map::is_empty)
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        dotted_path
            .split('.')
            .try_fold(&self.0, |cur, segment| cur.as_object()?.get(segment))
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    /// Sets a value, creating (or replacing non-object) intermediate segments.
    pub fn set(&mut self, dotted_path: &str, value: impl Into<Value>) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }
        let Value::Object(root) = &mut self.0 else {
            return;
        };

        let mut cur = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(segment.to_string(), value.into());
                return;
            }
            let slot = cur
                .entry(segment)
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    /// Objects merge key by key; any other incoming value replaces what is there.
    pub fn deep_merge(&mut self, overrides: &VisOptions) {
        merge_into(&mut self.0, &overrides.0);
    }

    pub fn merged(mut self, overrides: &VisOptions) -> Self {
        self.deep_merge(overrides);
        self
    }
}

fn merge_into(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(slot) => merge_into(slot, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (slot, in_value) => *slot = in_value.clone(),
    }
}
