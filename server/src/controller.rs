use std::future::IntoFuture;
use std::marker::PhantomData;

// Original: https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs
/// Turns a request into a service input.
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub trait TryIntake<I>: 'static + Sync + Send {
    type To;
    type Error;
    fn emit(&self, input: I) -> Result<Self::To, Self::Error>;
}

pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

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

impl<T, P, I, D, O> Controller<T, P, I, D, O>
where
    T: TryIntake<I, To = D>,
{
    pub fn try_intake(self, input: I) -> Result<Transformed<T, P, I, D, O>, T::Error> {
        Ok(Transformed {
            transformed: self.transformer.emit(input)?,
            controller: self,
            _i: PhantomData,
            _o: PhantomData,
        })
    }
}

impl<P, O> Controller<(), P, (), (), O>
where
    P: Exhaust<O>,
{
    /// Runs a service that takes no input.
    pub async fn bypass<F, Fut, E>(self, f: F) -> Result<P::To, E>
    where
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.preset().emit(f().await?))
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
    P: Exhaust<O>,
{
    pub async fn handle<F, Fut, E>(self, f: F) -> Result<P::To, E>
    where
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        Ok(self.controller.preset().emit(f(self.transformed).await?))
    }
}

impl<T, P, I, D, O> Transformed<T, P, I, D, O>
where
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

impl<T, I, D> Transformed<T, (), I, D, ()> {
    /// Hands the service result back untouched.
    pub async fn bypass<F, Fut, O, E>(self, f: F) -> Result<O, E>
    where
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = Result<O, E>>,
    {
        f(self.transformed).await
    }
}

#[cfg(test)]
mod test {
    use super::{Controller, Exhaust, Intake, TryExhaust, TryIntake};

    struct Doubler;

    impl Intake<i32> for Doubler {
        type To = i64;
        fn emit(&self, input: i32) -> Self::To {
            i64::from(input) * 2
        }
    }

    impl TryIntake<&'static str> for Doubler {
        type To = i64;
        type Error = String;
        fn emit(&self, input: &'static str) -> Result<Self::To, Self::Error> {
            input.parse::<i64>().map(|n| n * 2).map_err(|e| e.to_string())
        }
    }

    struct Show;

    impl Exhaust<i64> for Show {
        type To = String;
        fn emit(&self, input: i64) -> Self::To {
            input.to_string()
        }
    }

    impl TryExhaust<Option<i64>> for Show {
        type To = i64;
        type Error = String;
        fn emit(&self, input: Option<i64>) -> Result<Self::To, Self::Error> {
            input.ok_or_else(|| "missing".to_string())
        }
    }

    #[tokio::test]
    async fn intake_then_present() {
        let shown = Controller::new(Doubler, Show)
            .intake(21)
            .handle(|n| async move { Ok::<_, String>(n + 1) })
            .await;
        assert_eq!(shown, Ok("43".to_string()));
    }

    #[tokio::test]
    async fn fallible_intake_and_presenter() {
        let parsed = Controller::new(Doubler, Show)
            .try_intake("4")
            .unwrap()
            .handle(|n| async move { Ok::<_, String>(n) })
            .await;
        assert_eq!(parsed, Ok("8".to_string()));
        assert!(Controller::<_, Show, _, i64, i64>::new(Doubler, Show)
            .try_intake("x")
            .is_err());

        let missing = Controller::new(Doubler, Show)
            .intake(1)
            .try_handle(|_| async move { Ok::<Option<i64>, String>(None) })
            .await;
        assert_eq!(missing, Err("missing".to_string()));
    }
}
