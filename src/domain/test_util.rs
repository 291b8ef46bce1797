use anyhow::anyhow;

/// Connectivity represents the "connected" state of a fake driven port and provides
/// common behavior for returning an error if the port is configured to be unreachable.
pub enum Connectivity {
    Connected,
    Disconnected,
}

impl Connectivity {
    /// Return an error if connectivity is in a "disconnected" state
    pub fn blow_up_if_disconnected(&self) -> Result<(), anyhow::Error> {
        match self {
            Self::Connected => Ok(()),
            Self::Disconnected => Err(anyhow!("could not reach the todo store!")),
        }
    }
}

/// FakeImplementation stands in for a single trait method on a fake port. It records the
/// arguments of every call and hands back a preconfigured return value, which keeps fakes for
/// async traits simple without a mocking framework.
///
/// * [Args] is the tuple (or single value) of captured arguments
/// * [Ret] is the method's return type
///
/// # Example
///
/// ```ignore
/// struct FakeTodoPort {
///     todo_by_id_result: FakeImplementation<i64, anyhow::Result<Option<TodoItem>>>,
/// }
///
/// impl TodoPort for Mutex<FakeTodoPort> {
///     async fn todo_by_id(&self, todo_id: i64, _store: &impl TodoStore) -> anyhow::Result<Option<TodoItem>> {
///         let mut locked_self = self.lock().unwrap();
///         locked_self.todo_by_id_result.save_arguments(todo_id);
///         locked_self.todo_by_id_result.return_value_anyhow()
///     }
/// }
/// ```
pub struct FakeImplementation<Args, Ret> {
    saved_arguments: Vec<Args>,
    return_value: Option<Ret>,
}

impl<Args, Ret> FakeImplementation<Args, Ret> {
    pub fn new() -> FakeImplementation<Args, Ret> {
        FakeImplementation {
            saved_arguments: Vec::new(),
            return_value: None,
        }
    }

    /// Saves arguments from a single invocation
    pub fn save_arguments(&mut self, arguments: Args) {
        self.saved_arguments.push(arguments)
    }

    /// Every set of arguments this fake has been called with, oldest first
    pub fn calls(&self) -> &[Args] {
        self.saved_arguments.as_slice()
    }
}

impl<Args, Success, Fail> FakeImplementation<Args, Result<Success, Fail>>
where
    Success: Clone,
    Fail: Clone,
{
    pub fn set_returned_result(&mut self, return_value: Result<Success, Fail>) {
        self.return_value = Some(return_value)
    }

    pub fn return_value_result(&self) -> Result<Success, Fail> {
        match self.return_value {
            Some(ref configured) => configured.clone(),
            None => panic!("Tried to return from a fake where the return value wasn't set!"),
        }
    }
}

impl<Args, Success> FakeImplementation<Args, anyhow::Result<Success>>
where
    Success: Clone,
{
    /// [anyhow::Error] is not [Clone], so configured errors are stored by message and rebuilt
    /// on every call.
    pub fn set_returned_anyhow(&mut self, return_value: anyhow::Result<Success>) {
        self.return_value = Some(return_value.map_err(|err| anyhow!(format!("{err}"))));
    }

    pub fn return_value_anyhow(&self) -> anyhow::Result<Success> {
        match self.return_value {
            None => panic!("Tried to return from a fake where the return value wasn't set!"),
            Some(Ok(ref ok_result)) => Ok(ok_result.clone()),
            Some(Err(ref err)) => Err(anyhow!(format!("{err}"))),
        }
    }
}
