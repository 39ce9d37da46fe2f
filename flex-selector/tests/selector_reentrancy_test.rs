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

//! Evaluations share no parser state: the same inputs always give the same answer, on
//! one thread or many.

use std::sync::Arc;
use std::thread;

use flex_selector::compile;
use flex_selector::evaluate;
use flex_selector::expression::evaluation_context::MessageEvaluationContext;
use flex_selector::filter::SelectorCache;
use flex_selector::filter::SqlFilter;

const SELECTOR: &str = "(priority between 3 and 7) and (region in ('eu', 'us')) and (name like 'order-%')";

fn context(priority: i64, region: &str) -> MessageEvaluationContext {
    let mut context = MessageEvaluationContext::new();
    context.put("priority", priority);
    context.put("region", region);
    context.put("name", format!("order-{priority}"));
    context
}

#[test]
fn test_repeated_evaluation_is_stable() {
    let matching = context(5, "eu");
    let other = context(9, "eu");

    let first = evaluate(SELECTOR, &matching);
    assert_eq!(first, Ok(true));
    // an evaluation with different variables in between must not leak into the next one
    assert_eq!(evaluate(SELECTOR, &other), Ok(false));
    assert_eq!(evaluate(SELECTOR, &matching), first);

    let err = evaluate("missing = 1", &matching);
    assert_eq!(evaluate("missing = 1", &matching), err);
}

#[test]
fn test_compiled_selector_is_reusable() {
    let selector = compile(SELECTOR).unwrap();
    for priority in 0..10 {
        let expected = (3..=7).contains(&priority);
        assert_eq!(selector.matches(&context(priority, "us")).unwrap(), expected);
        assert_eq!(selector.matches(&context(priority, "us")).unwrap(), expected);
    }
}

#[test]
fn test_concurrent_evaluation_with_separate_contexts() {
    thread::scope(|scope| {
        let handles: Vec<_> = (0..8i64)
            .map(|worker| {
                scope.spawn(move || {
                    let region = if worker % 2 == 0 { "eu" } else { "apac" };
                    let context = context(worker, region);
                    let expected = (3..=7).contains(&worker) && region == "eu";
                    for _ in 0..200 {
                        assert_eq!(evaluate(SELECTOR, &context), Ok(expected));
                    }
                    expected
                })
            })
            .collect();
        let matched = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|matched| *matched)
            .count();
        // workers 4 and 6
        assert_eq!(matched, 2);
    });
}

#[test]
fn test_shared_compiled_selector_across_threads() {
    let cache = Arc::new(SelectorCache::new(Arc::new(SqlFilter::new()), 16));
    let shared_context = context(4, "us");

    thread::scope(|scope| {
        for worker in 0..4 {
            let cache = Arc::clone(&cache);
            let shared_context = &shared_context;
            scope.spawn(move || {
                let own_context = context(worker * 3, "eu");
                for _ in 0..100 {
                    assert_eq!(cache.evaluate(SELECTOR, shared_context), Ok(true));
                    assert_eq!(
                        cache.evaluate(SELECTOR, &own_context),
                        Ok((3..=7).contains(&(worker * 3)))
                    );
                }
            });
        }
    });
    assert_eq!(cache.len(), 1);
}
