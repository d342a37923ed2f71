//! A single rung: components in power-flow order ending in one coil.
//!
//! Evaluation folds left to right starting from a TRUE left rail:
//! 1. Contacts are always evaluated (edge memory must see every scan) and
//!    ANDed into the rail.
//! 2. Function blocks receive the rail as IN and replace it with their Q.
//! 3. The coil receives the final rail.

use ladder_common::error::{LadderError, LadderResult};
use ladder_stdlib::component::{Component, Role};
use tracing::debug;

/// One rung of a ladder program.
///
/// Holds exactly one output coil at all times; the check runs at
/// construction and on every append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rung {
    components: Vec<Component>,
    /// Position of the coil in `components`.
    output_index: usize,
    /// Coil state after the most recent evaluation.
    last_result: Option<bool>,
}

impl Rung {
    /// Build a rung from components in power-flow order.
    ///
    /// The coil may sit at any position.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::NoOutput`] or [`LadderError::MultipleOutputs`]
    /// unless exactly one component is a coil.
    ///
    /// # Example
    ///
    /// ```
    /// use ladder_runtime::Rung;
    /// use ladder_stdlib::{Contact, InvertedContact, Output};
    ///
    /// let mut rung = Rung::new(vec![
    ///     Contact::new("Start").into(),
    ///     InvertedContact::new("Stop").into(),
    ///     Output::new("Motor").into(),
    /// ])
    /// .unwrap();
    ///
    /// assert!(!rung.evaluate());
    /// rung.activate("Start").unwrap();
    /// assert!(rung.evaluate());
    /// ```
    pub fn new(components: Vec<Component>) -> LadderResult<Self> {
        let output_index = locate_output(&components)?;
        debug!(
            output = components[output_index].name(),
            components = components.len(),
            "Rung created"
        );
        Ok(Self {
            components,
            output_index,
            last_result: None,
        })
    }

    /// Append a component to the right-hand end.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::MultipleOutputs`] if `component` is a coil; the
    /// rung is left unchanged.
    pub fn add_component(&mut self, component: impl Into<Component>) -> LadderResult<()> {
        let component = component.into();
        if component.is_output() {
            return Err(LadderError::MultipleOutputs { count: 2 });
        }
        self.components.push(component);
        Ok(())
    }

    /// Execute one scan of this rung and return the coil state.
    pub fn evaluate(&mut self) -> bool {
        let mut rail = true;
        for (index, component) in self.components.iter_mut().enumerate() {
            if index == self.output_index {
                continue;
            }
            match component.role() {
                Role::FunctionBlock => rail = component.evaluate(rail),
                // Evaluated even when the rail is already open.
                Role::Input => rail &= component.evaluate(rail),
                Role::Output => {}
            }
        }

        let result = self.components[self.output_index].evaluate(rail);
        self.last_result = Some(result);
        result
    }

    /// All components, coil included, in power-flow order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The output coil.
    #[must_use]
    pub fn output(&self) -> &Component {
        &self.components[self.output_index]
    }

    /// Components other than the coil, in power-flow order.
    pub fn inputs(&self) -> impl Iterator<Item = &Component> {
        let output_index = self.output_index;
        self.components
            .iter()
            .enumerate()
            .filter(move |(index, _)| *index != output_index)
            .map(|(_, component)| component)
    }

    /// Coil state after the last evaluation, `None` before the first.
    #[must_use]
    pub fn last_result(&self) -> Option<bool> {
        self.last_result
    }

    /// Number of components, coil included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always false: a rung holds at least its coil.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Find a component by name.
    #[must_use]
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name() == name)
    }

    /// Find a component by name for mutation.
    pub fn component_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.name() == name)
    }

    /// Actuate the named contact.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::ComponentNotFound`] or [`LadderError::NotAnInput`].
    pub fn activate(&mut self, name: &str) -> LadderResult<()> {
        self.component_mut(name)
            .ok_or_else(|| LadderError::ComponentNotFound(name.to_string()))?
            .activate()
    }

    /// Release the named contact.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::ComponentNotFound`] or [`LadderError::NotAnInput`].
    pub fn deactivate(&mut self, name: &str) -> LadderResult<()> {
        self.component_mut(name)
            .ok_or_else(|| LadderError::ComponentNotFound(name.to_string()))?
            .deactivate()
    }

    /// Reset every component that supports it.
    pub fn reset(&mut self) {
        for component in &mut self.components {
            component.reset();
        }
        self.last_result = None;
    }
}

fn locate_output(components: &[Component]) -> LadderResult<usize> {
    let mut outputs = components
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_output())
        .map(|(index, _)| index);

    let first = outputs.next().ok_or(LadderError::NoOutput)?;
    let extra = outputs.count();
    if extra > 0 {
        return Err(LadderError::MultipleOutputs { count: extra + 1 });
    }
    Ok(first)
}
