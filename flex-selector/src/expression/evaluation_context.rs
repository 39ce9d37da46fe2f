// Copyright 2023 The Flex Selector Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::hash::BuildHasher;

use ahash::RandomState;
use cheetah_string::CheetahString;
use flex_error::FlexError;
use flex_error::FlexResult;

use crate::expression::value::Value;

/// Trait for expression evaluation context.
///
/// The context is the variable environment of one evaluation: it maps selector variable
/// names (typically message header or body fields) to typed values. Lookups are exact and
/// case-sensitive. The context is only read during evaluation, so a single context may be
/// shared by concurrent evaluations.
///
/// # Example
///
/// ```ignore
/// let mut context = MessageEvaluationContext::default();
/// context.put("priority", 4);
/// assert!(context.contains("priority"));
/// ```
pub trait EvaluationContext {
    /// Get value by name from context.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the variable to retrieve
    ///
    /// # Returns
    ///
    /// Returns `Some(&Value)` if the variable is bound, `None` otherwise.
    fn get(&self, name: &str) -> Option<&Value>;

    /// Returns `true` if the variable is bound; this is what `IS NULL` tests.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get all context variables as a key-value mapping.
    ///
    /// # Returns
    ///
    /// Returns `Some(HashMap)` containing all variables, or `None` if the context
    /// does not support bulk retrieval.
    fn key_values(&self) -> Option<HashMap<CheetahString, Value>>;
}

impl<S: BuildHasher> EvaluationContext for HashMap<String, Value, S> {
    fn get(&self, name: &str) -> Option<&Value> {
        HashMap::get(self, name)
    }

    fn key_values(&self) -> Option<HashMap<CheetahString, Value>> {
        Some(
            self.iter()
                .map(|(k, v)| (CheetahString::from_slice(k), v.clone()))
                .collect(),
        )
    }
}

/// Default implementation of `EvaluationContext` for message filtering.
///
/// Stores the selector variables bound from a message (headers, body fields) in a
/// `HashMap` keyed by `CheetahString` and hashed with `ahash`.
///
/// # Example
///
/// ```ignore
/// use flex_selector::expression::evaluation_context::MessageEvaluationContext;
///
/// let mut context = MessageEvaluationContext::default();
/// context.put("region", "emea");
/// context.put("priority", 7);
///
/// assert_eq!(context.get("region").and_then(|v| v.as_str()), Some("emea"));
/// assert_eq!(context.get("nonexistent"), None);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MessageEvaluationContext {
    #[serde(with = "hashmap_serde")]
    properties: HashMap<CheetahString, Value, RandomState>,
}

// Custom serde implementation for HashMap with RandomState
mod hashmap_serde {
    use super::*;
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serialize;
    use serde::Serializer;

    pub fn serialize<S>(map: &HashMap<CheetahString, Value, RandomState>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let standard_map: HashMap<&CheetahString, &Value> = map.iter().collect();
        standard_map.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<HashMap<CheetahString, Value, RandomState>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let standard_map: HashMap<CheetahString, Value> = HashMap::deserialize(deserializer)?;
        let mut ahash_map = HashMap::with_capacity_and_hasher(standard_map.len(), RandomState::default());
        ahash_map.extend(standard_map);
        Ok(ahash_map)
    }
}

impl Default for MessageEvaluationContext {
    fn default() -> Self {
        Self {
            properties: HashMap::with_hasher(RandomState::default()),
        }
    }
}

impl MessageEvaluationContext {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new evaluation context with a pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            properties: HashMap::with_capacity_and_hasher(capacity, RandomState::default()),
        }
    }

    #[inline]
    pub fn from_properties(properties: HashMap<CheetahString, Value, RandomState>) -> Self {
        Self { properties }
    }

    /// Builds a context from a JSON object whose members are booleans, numbers or strings.
    ///
    /// # Errors
    ///
    /// Returns [`FlexError::DecodeFailed`] if the text is not a JSON object of scalars.
    pub fn from_json(json: &str) -> FlexResult<Self> {
        serde_json::from_str(json).map_err(|e| FlexError::decode_failed("JSON", e.to_string()))
    }

    /// Binds a variable, returning the value it replaced.
    #[inline]
    pub fn put(&mut self, key: impl Into<CheetahString>, value: impl Into<Value>) -> Option<Value> {
        self.properties.insert(key.into(), value.into())
    }

    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.properties.clear();
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&CheetahString, &Value)> {
        self.properties.iter()
    }

    #[inline]
    pub fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (CheetahString, Value)>,
    {
        self.properties.extend(iter);
    }
}

impl<K, V> FromIterator<(K, V)> for MessageEvaluationContext
where
    K: Into<CheetahString>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = MessageEvaluationContext::new();
        context.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
        context
    }
}

impl EvaluationContext for MessageEvaluationContext {
    #[inline]
    fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    #[inline]
    fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    fn key_values(&self) -> Option<HashMap<CheetahString, Value>> {
        Some(self.properties.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}
