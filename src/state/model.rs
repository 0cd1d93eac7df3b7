/// Where the application object is in its single pass from bootstrap to exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Bootstrapped,
    Connected,
    Running,
    Finished,
}
