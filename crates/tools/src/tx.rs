//! Append-only setup transaction builder
//!
//! [`TransactionBuilder`] is the narrow surface the setup flows write to. The
//! crate's own implementation, [`SetupTransaction`], records the high-level
//! operations in order and lowers them into a Sui programmable transaction
//! that an external signer can submit.

use serde::Serialize;
use suins_core::SuiAddress;
use thiserror::Error;

/// Result of an operation that produces an object, usable by later operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObjectHandle(usize);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("operation #{0} does not produce an object in this transaction")]
    DanglingHandle(usize),

    #[error("transaction exceeds {0} inputs or commands")]
    TooLarge(usize),
}

/// High-level operations appended by the setup flows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    CreateDisplay {
        type_arg: String,
        publisher: SuiAddress,
        fields: Vec<(String, String)>,
    },
    BumpDisplayVersion {
        display: ObjectHandle,
        type_arg: String,
    },
    CreateTransferPolicy {
        type_arg: String,
        publisher: SuiAddress,
    },
    TransferObjects {
        objects: Vec<ObjectHandle>,
        recipient: SuiAddress,
    },
}

/// Append-only builder used by the setup flows.
pub trait TransactionBuilder {
    /// `0x2::display::new_with_fields<T>`; returns the new display object.
    fn create_display(
        &mut self,
        type_arg: &str,
        publisher: SuiAddress,
        fields: &[(&str, &str)],
    ) -> ObjectHandle;

    /// `0x2::display::update_version<T>` on a display created earlier.
    fn bump_display_version(&mut self, display: ObjectHandle, type_arg: &str);

    /// Create and share a `TransferPolicy<T>`; returns its `TransferPolicyCap<T>`.
    fn create_transfer_policy(&mut self, type_arg: &str, publisher: SuiAddress) -> ObjectHandle;

    fn transfer_objects(&mut self, objects: &[ObjectHandle], recipient: SuiAddress);
}

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallArg {
    Object(SuiAddress),
    Pure(PureValue),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PureValue {
    Address(SuiAddress),
    Strings(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Argument {
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveCall {
    pub package: SuiAddress,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Argument>,
}

impl MoveCall {
    fn framework(module: &str, function: &str, type_argument: String, arguments: Vec<Argument>) -> Self {
        Self {
            package: SuiAddress::FRAMEWORK,
            module: module.to_string(),
            function: function.to_string(),
            type_arguments: vec![type_argument],
            arguments,
        }
    }

    /// `package::module::function`
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Command {
    MoveCall(MoveCall),
    TransferObjects {
        objects: Vec<Argument>,
        address: Argument,
    },
}

/// Lowered, unsigned programmable transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

impl ProgrammableTransaction {
    fn input(&mut self, arg: CallArg) -> Result<Argument, BuildError> {
        let index = index(self.inputs.len())?;
        self.inputs.push(arg);
        Ok(Argument::Input(index))
    }

    fn command(&mut self, command: Command) -> Result<u16, BuildError> {
        let index = index(self.commands.len())?;
        self.commands.push(command);
        Ok(index)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn lookup(produced: &[Option<Argument>], handle: ObjectHandle) -> Result<Argument, BuildError> {
    produced
        .get(handle.0)
        .copied()
        .flatten()
        .ok_or(BuildError::DanglingHandle(handle.0))
}

fn index(len: usize) -> Result<u16, BuildError> {
    u16::try_from(len).map_err(|_| BuildError::TooLarge(usize::from(u16::MAX)))
}

/// Records setup operations in the order they were appended.
#[derive(Debug, Clone, Default)]
pub struct SetupTransaction {
    operations: Vec<Operation>,
}

impl SetupTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    fn push(&mut self, operation: Operation) -> ObjectHandle {
        self.operations.push(operation);
        ObjectHandle(self.operations.len() - 1)
    }

    /// Lower the recorded operations into Sui framework calls.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::DanglingHandle` if an operation refers to a handle
    /// that no earlier operation of this transaction produced.
    pub fn build(&self) -> Result<ProgrammableTransaction, BuildError> {
        let mut ptb = ProgrammableTransaction::default();
        let mut produced: Vec<Option<Argument>> = Vec::with_capacity(self.operations.len());

        for operation in &self.operations {
            let result = match operation {
                Operation::CreateDisplay {
                    type_arg,
                    publisher,
                    fields,
                } => {
                    let (keys, values): (Vec<String>, Vec<String>) = fields.iter().cloned().unzip();
                    let publisher = ptb.input(CallArg::Object(*publisher))?;
                    let keys = ptb.input(CallArg::Pure(PureValue::Strings(keys)))?;
                    let values = ptb.input(CallArg::Pure(PureValue::Strings(values)))?;
                    let call = ptb.command(Command::MoveCall(MoveCall::framework(
                        "display",
                        "new_with_fields",
                        type_arg.clone(),
                        vec![publisher, keys, values],
                    )))?;
                    Some(Argument::Result(call))
                }
                Operation::BumpDisplayVersion { display, type_arg } => {
                    let display = lookup(&produced, *display)?;
                    ptb.command(Command::MoveCall(MoveCall::framework(
                        "display",
                        "update_version",
                        type_arg.clone(),
                        vec![display],
                    )))?;
                    None
                }
                Operation::CreateTransferPolicy {
                    type_arg,
                    publisher,
                } => {
                    let publisher = ptb.input(CallArg::Object(*publisher))?;
                    let call = ptb.command(Command::MoveCall(MoveCall::framework(
                        "transfer_policy",
                        "new",
                        type_arg.clone(),
                        vec![publisher],
                    )))?;
                    // new<T> returns (TransferPolicy<T>, TransferPolicyCap<T>)
                    ptb.command(Command::MoveCall(MoveCall::framework(
                        "transfer",
                        "public_share_object",
                        format!("{}::transfer_policy::TransferPolicy<{type_arg}>", SuiAddress::FRAMEWORK),
                        vec![Argument::NestedResult(call, 0)],
                    )))?;
                    Some(Argument::NestedResult(call, 1))
                }
                Operation::TransferObjects { objects, recipient } => {
                    let objects = objects
                        .iter()
                        .map(|handle| lookup(&produced, *handle))
                        .collect::<Result<Vec<_>, _>>()?;
                    let address = ptb.input(CallArg::Pure(PureValue::Address(*recipient)))?;
                    ptb.command(Command::TransferObjects { objects, address })?;
                    None
                }
            };
            produced.push(result);
        }

        Ok(ptb)
    }
}

impl TransactionBuilder for SetupTransaction {
    fn create_display(
        &mut self,
        type_arg: &str,
        publisher: SuiAddress,
        fields: &[(&str, &str)],
    ) -> ObjectHandle {
        self.push(Operation::CreateDisplay {
            type_arg: type_arg.to_string(),
            publisher,
            fields: fields
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        })
    }

    fn bump_display_version(&mut self, display: ObjectHandle, type_arg: &str) {
        self.push(Operation::BumpDisplayVersion {
            display,
            type_arg: type_arg.to_string(),
        });
    }

    fn create_transfer_policy(&mut self, type_arg: &str, publisher: SuiAddress) -> ObjectHandle {
        self.push(Operation::CreateTransferPolicy {
            type_arg: type_arg.to_string(),
            publisher,
        })
    }

    fn transfer_objects(&mut self, objects: &[ObjectHandle], recipient: SuiAddress) {
        self.push(Operation::TransferObjects {
            objects: objects.to_vec(),
            recipient,
        });
    }
}
