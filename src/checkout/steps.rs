use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    Delivery,
    Payment,
    Review,
    Confirmation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("the review step advances only by placing the order")]
    SubmitRequired,

    #[error("checkout is already confirmed")]
    AlreadyConfirmed,

    #[error("already at the first step")]
    AtFirstStep,

    #[error("checkout steps must be completed in order")]
    OutOfOrder,
}

/// Linear checkout wizard state.
///
/// Steps advance strictly in order; a step is only reachable once every
/// prior step has validated in this session. `Review` leads to
/// `Confirmation` exclusively through [`CheckoutProgress::confirm`], which
/// the submission flow calls after the payment succeeds.
#[derive(Debug, Clone, Default)]
pub struct CheckoutProgress {
    step: CheckoutStep,
    delivery_complete: bool,
    payment_complete: bool,
}

impl CheckoutProgress {
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn delivery_complete(&self) -> bool {
        self.delivery_complete
    }

    pub fn payment_complete(&self) -> bool {
        self.payment_complete
    }

    /// Mark the current step validated and move forward one step. The
    /// caller validates the step's form fields first.
    pub fn advance(&mut self) -> Result<CheckoutStep, StepError> {
        match self.step {
            CheckoutStep::Delivery => {
                self.delivery_complete = true;
                self.step = CheckoutStep::Payment;
            }
            CheckoutStep::Payment => {
                self.payment_complete = true;
                self.step = CheckoutStep::Review;
            }
            CheckoutStep::Review => return Err(StepError::SubmitRequired),
            CheckoutStep::Confirmation => return Err(StepError::AlreadyConfirmed),
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> Result<CheckoutStep, StepError> {
        match self.step {
            CheckoutStep::Delivery => Err(StepError::AtFirstStep),
            CheckoutStep::Payment => {
                self.step = CheckoutStep::Delivery;
                Ok(self.step)
            }
            CheckoutStep::Review => {
                self.step = CheckoutStep::Payment;
                Ok(self.step)
            }
            CheckoutStep::Confirmation => Err(StepError::AlreadyConfirmed),
        }
    }

    /// Transition `review -> confirmation`. Only the submission flow calls
    /// this, and only after the deposit charge succeeded.
    pub fn confirm(&mut self) -> Result<CheckoutStep, StepError> {
        if self.step != CheckoutStep::Review
            || !self.delivery_complete
            || !self.payment_complete
        {
            return Err(StepError::OutOfOrder);
        }
        self.step = CheckoutStep::Confirmation;
        Ok(self.step)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// A confirmed checkout alongside a non-empty cart means the shopper
    /// started a second order in the same session: force back to the first
    /// step. Returns true when a reset happened.
    pub fn reset_if_resumed(&mut self, cart_is_empty: bool) -> bool {
        if self.step == CheckoutStep::Confirmation && !cart_is_empty {
            self.reset();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_advance_in_order() {
        let mut progress = CheckoutProgress::default();
        assert_eq!(progress.step(), CheckoutStep::Delivery);
        assert_eq!(progress.advance(), Ok(CheckoutStep::Payment));
        assert_eq!(progress.advance(), Ok(CheckoutStep::Review));
        assert!(progress.delivery_complete());
        assert!(progress.payment_complete());
    }

    #[test]
    fn review_cannot_advance_without_submission() {
        let mut progress = CheckoutProgress::default();
        progress.advance().unwrap();
        progress.advance().unwrap();
        assert_eq!(progress.advance(), Err(StepError::SubmitRequired));
        assert_eq!(progress.confirm(), Ok(CheckoutStep::Confirmation));
        assert_eq!(progress.advance(), Err(StepError::AlreadyConfirmed));
    }

    #[test]
    fn confirm_requires_both_prior_steps() {
        let mut progress = CheckoutProgress::default();
        assert_eq!(progress.confirm(), Err(StepError::OutOfOrder));
        progress.advance().unwrap();
        assert_eq!(progress.confirm(), Err(StepError::OutOfOrder));
    }

    #[test]
    fn back_walks_to_the_first_step_and_stops() {
        let mut progress = CheckoutProgress::default();
        progress.advance().unwrap();
        progress.advance().unwrap();
        assert_eq!(progress.back(), Ok(CheckoutStep::Payment));
        assert_eq!(progress.back(), Ok(CheckoutStep::Delivery));
        assert_eq!(progress.back(), Err(StepError::AtFirstStep));
    }

    #[test]
    fn confirmation_with_items_in_cart_resets() {
        let mut progress = CheckoutProgress::default();
        progress.advance().unwrap();
        progress.advance().unwrap();
        progress.confirm().unwrap();

        assert!(!progress.reset_if_resumed(true));
        assert_eq!(progress.step(), CheckoutStep::Confirmation);

        assert!(progress.reset_if_resumed(false));
        assert_eq!(progress.step(), CheckoutStep::Delivery);
        assert!(!progress.delivery_complete());
    }
}
