use std::future::IntoFuture;
use std::marker::PhantomData;

// Original: https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs
/// Turns a request into the input of an application service.
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

/// Turns the output of an application service into a response, possibly failing.
pub trait TryExhaust<I>: 'static + Sync + Send {
    type To;
    type Error;
    fn emit(&self, input: I) -> Result<Self::To, Self::Error>;
}

pub struct Controller<T, P, I, D, O> {
    transformer: T,
    presenter: P,
    _i: PhantomData<I>,
    _t: PhantomData<D>,
    _o: PhantomData<O>,
}

impl<T, P, I, D, O> Controller<T, P, I, D, O> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
            _i: PhantomData,
            _t: PhantomData,
            _o: PhantomData,
        }
    }

    fn preset(self) -> P {
        self.presenter
    }
}

impl<T, P, I, D, O> Controller<T, P, I, D, O>
where
    T: Intake<I, To = D>,
{
    pub fn intake(self, input: I) -> Transformed<T, P, I, D, O> {
        Transformed {
            transformed: self.transformer.emit(input),
            controller: self,
            _i: PhantomData,
            _o: PhantomData,
        }
    }
}

pub struct Transformed<T, P, I, D, O> {
    transformed: D,
    controller: Controller<T, P, I, D, O>,
    _i: PhantomData<I>,
    _o: PhantomData<O>,
}

impl<T, P, I, D, O> Transformed<T, P, I, D, O>
where
    T: Intake<I, To = D>,
    P: TryExhaust<O>,
{
    pub async fn try_handle<F, Fut, E>(self, f: F) -> Result<P::To, P::Error>
    where
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
        E: Into<P::Error>,
    {
        self.controller
            .preset()
            .emit(f(self.transformed).await.map_err(Into::into)?)
    }
}

#[cfg(test)]
mod test {
    use crate::controller::{Controller, Intake, TryExhaust};

    struct Double;

    impl Intake<u32> for Double {
        type To = u64;
        fn emit(&self, input: u32) -> Self::To {
            u64::from(input) * 2
        }
    }

    struct Describe;

    impl TryExhaust<u64> for Describe {
        type To = String;
        type Error = String;
        fn emit(&self, input: u64) -> Result<Self::To, Self::Error> {
            if input > 100 {
                return Err(format!("{input} is too large"));
            }
            Ok(format!("got {input}"))
        }
    }

    #[tokio::test]
    async fn runs_transform_handle_present() {
        let result = Controller::new(Double, Describe)
            .intake(21u32)
            .try_handle(|doubled| async move { Ok::<_, String>(doubled + 1) })
            .await;
        assert_eq!(result, Ok("got 43".to_string()));
    }

    #[tokio::test]
    async fn handler_error_short_circuits() {
        let result = Controller::new(Double, Describe)
            .intake(1u32)
            .try_handle(|_| async move { Err::<u64, _>("store unreachable".to_string()) })
            .await;
        assert_eq!(result, Err("store unreachable".to_string()));
    }

    #[tokio::test]
    async fn presenter_error_is_returned() {
        let result = Controller::new(Double, Describe)
            .intake(60u32)
            .try_handle(|doubled| async move { Ok::<_, String>(doubled) })
            .await;
        assert_eq!(result, Err("120 is too large".to_string()));
    }
}
