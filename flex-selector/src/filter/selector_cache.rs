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

use std::sync::Arc;

use cheetah_string::CheetahString;
use dashmap::DashMap;
use flex_error::SelectorResult;
use tracing::debug;
use tracing::warn;

use crate::expression::boolean_expression::BooleanExpression;
use crate::expression::EvaluationContext;
use crate::filter::filter_spi::Filter;

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Compiled selectors keyed by their source text.
///
/// Once `capacity` selectors are held the cache is cleared before the next insert. A
/// capacity of zero disables caching. Selectors that fail to compile are never cached.
#[derive(Debug)]
pub struct SelectorCache {
    filter: Arc<dyn Filter>,
    capacity: usize,
    entries: DashMap<CheetahString, Arc<dyn BooleanExpression>>,
}

impl SelectorCache {
    pub fn new(filter: Arc<dyn Filter>, capacity: usize) -> Self {
        Self {
            filter,
            capacity,
            entries: DashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY)),
        }
    }

    pub fn get_or_compile(&self, expression: &str) -> SelectorResult<Arc<dyn BooleanExpression>> {
        if let Some(compiled) = self.entries.get(expression) {
            return Ok(Arc::clone(compiled.value()));
        }

        let compiled: Arc<dyn BooleanExpression> = Arc::from(self.filter.compile(expression)?);
        if self.capacity == 0 {
            return Ok(compiled);
        }
        if self.entries.len() >= self.capacity {
            warn!(
                "selector cache of {} filter reached its capacity of {}, clearing it",
                self.filter.of_type(),
                self.capacity
            );
            self.entries.clear();
        }
        self.entries
            .insert(CheetahString::from_slice(expression), Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Compiles `expression` if needed and matches it against `context`.
    pub fn evaluate(&self, expression: &str, context: &dyn EvaluationContext) -> SelectorResult<bool> {
        let matched = self.get_or_compile(expression)?.matches(context)?;
        debug!("selector {:?} evaluated to {}", expression, matched);
        Ok(matched)
    }

    pub fn filter(&self) -> &Arc<dyn Filter> {
        &self.filter
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, expression: &str) -> bool {
        self.entries.contains_key(expression)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use flex_error::SelectorErrorKind;

    use super::*;
    use crate::expression::evaluation_context::MessageEvaluationContext;
    use crate::filter::SqlFilter;

    fn cache(capacity: usize) -> SelectorCache {
        SelectorCache::new(Arc::new(SqlFilter::new()), capacity)
    }

    #[test]
    fn reuses_compiled_selectors() {
        let cache = cache(8);
        let first = cache.get_or_compile("a > 1").unwrap();
        let second = cache.get_or_compile("a > 1").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("a > 1"));
    }

    #[test]
    fn evaluates_against_each_context() {
        let cache = cache(8);
        let mut context = MessageEvaluationContext::new();
        context.put("a", 2);
        assert!(cache.evaluate("a > 1", &context).unwrap());

        context.put("a", 0);
        assert!(!cache.evaluate("a > 1", &context).unwrap());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn compile_failures_are_not_cached() {
        let cache = cache(8);
        let err = cache.get_or_compile("a >").unwrap_err();
        assert_eq!(err.kind(), SelectorErrorKind::Syntax);
        assert!(cache.is_empty());
    }

    #[test]
    fn clears_when_full() {
        let cache = cache(2);
        cache.get_or_compile("a = 1").unwrap();
        cache.get_or_compile("a = 2").unwrap();
        assert_eq!(cache.len(), 2);

        cache.get_or_compile("a = 3").unwrap();
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("a = 3"));
        assert!(!cache.contains("a = 1"));
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let cache = cache(0);
        let context = MessageEvaluationContext::new();
        assert!(cache.evaluate("1 = 1", &context).unwrap());
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = cache(8);
        cache.get_or_compile("1 = 1").unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.filter().of_type(), "SQL92");
    }
}
