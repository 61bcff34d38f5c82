//! Scripted decision provider with a shared call log.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::CardId;

use super::{CardOption, DecisionProvider, DefaultDecisions, OrderItem};

/// One prompt the provider answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecisionRecord {
    ChooseCard { prompt: String, choices: Vec<CardId> },
    Decide { prompt: String },
    ChooseOrder { prompt: String, items: Vec<OrderItem> },
    ChooseOption { prompt: String, options: Vec<String> },
    ChooseAmount { prompt: String, min: u32, max: u32 },
}

/// Shared handle to the prompts a `ScriptedDecisions` answered.
///
/// Clone it before handing the provider to the engine; both handles see the
/// same log.
#[derive(Clone, Debug, Default)]
pub struct DecisionLog(Rc<RefCell<Vec<DecisionRecord>>>);

impl DecisionLog {
    fn push(&self, record: DecisionRecord) {
        self.0.borrow_mut().push(record);
    }

    /// Every record so far.
    #[must_use]
    pub fn records(&self) -> Vec<DecisionRecord> {
        self.0.borrow().clone()
    }

    /// Item lists presented to `choose_order`, one entry per call.
    #[must_use]
    pub fn order_calls(&self) -> Vec<Vec<OrderItem>> {
        self.0
            .borrow()
            .iter()
            .filter_map(|r| match r {
                DecisionRecord::ChooseOrder { items, .. } => Some(items.clone()),
                _ => None,
            })
            .collect()
    }

    /// Prompts passed to `decide`.
    #[must_use]
    pub fn decide_prompts(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|r| match r {
                DecisionRecord::Decide { prompt } => Some(prompt.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Replays queued answers, falling back to `DefaultDecisions` when a queue
/// runs dry.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecisions {
    cards: VecDeque<CardId>,
    answers: VecDeque<bool>,
    orders: VecDeque<Vec<usize>>,
    options: VecDeque<String>,
    amounts: VecDeque<u32>,
    log: DecisionLog,
}

impl ScriptedDecisions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the call log.
    #[must_use]
    pub fn log(&self) -> DecisionLog {
        self.log.clone()
    }

    #[must_use]
    pub fn then_card(mut self, card: CardId) -> Self {
        self.cards.push_back(card);
        self
    }

    #[must_use]
    pub fn then_decide(mut self, answer: bool) -> Self {
        self.answers.push_back(answer);
        self
    }

    /// Queue an ordering answer (positions into the presented list).
    #[must_use]
    pub fn then_order(mut self, order: Vec<usize>) -> Self {
        self.orders.push_back(order);
        self
    }

    #[must_use]
    pub fn then_option(mut self, option: impl Into<String>) -> Self {
        self.options.push_back(option.into());
        self
    }

    #[must_use]
    pub fn then_amount(mut self, amount: u32) -> Self {
        self.amounts.push_back(amount);
        self
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn choose_card(&mut self, prompt: &str, choices: &[CardOption]) -> CardId {
        self.log.push(DecisionRecord::ChooseCard {
            prompt: prompt.to_owned(),
            choices: choices.iter().map(|c| c.id).collect(),
        });
        match self.cards.pop_front() {
            Some(card) => card,
            None => DefaultDecisions.choose_card(prompt, choices),
        }
    }

    fn decide(&mut self, prompt: &str) -> bool {
        self.log.push(DecisionRecord::Decide {
            prompt: prompt.to_owned(),
        });
        self.answers.pop_front().unwrap_or(true)
    }

    fn choose_order(&mut self, prompt: &str, items: &[OrderItem]) -> Vec<usize> {
        self.log.push(DecisionRecord::ChooseOrder {
            prompt: prompt.to_owned(),
            items: items.to_vec(),
        });
        match self.orders.pop_front() {
            Some(order) => order,
            None => DefaultDecisions.choose_order(prompt, items),
        }
    }

    fn choose_option(&mut self, prompt: &str, options: &[String]) -> String {
        self.log.push(DecisionRecord::ChooseOption {
            prompt: prompt.to_owned(),
            options: options.to_vec(),
        });
        match self.options.pop_front() {
            Some(option) => option,
            None => DefaultDecisions.choose_option(prompt, options),
        }
    }

    fn choose_amount(&mut self, prompt: &str, min: u32, max: u32) -> u32 {
        self.log.push(DecisionRecord::ChooseAmount {
            prompt: prompt.to_owned(),
            min,
            max,
        });
        self.amounts.pop_front().unwrap_or(max)
    }
}
