//! [`ScriptHost`] backed by Boa.

use boa_engine::object::FunctionObjectBuilder;
use boa_engine::object::builtins::{JsArray, JsFunction};
use boa_engine::{
    Context, JsError, JsNativeError, JsObject, JsResult, JsString, JsValue, NativeFunction, Source,
    js_string,
};

use crate::error::ScriptError;
use crate::globals;
use crate::host::ScriptHost;
use crate::value::{NativeFn, ScriptFunction, ScriptValue};
use captured::Captured;

/// Nesting deeper than this converts to `Nil`; it also stops cycles.
const MAX_DEPTH: usize = 32;

/// A Boa interpreter with the built-in globals installed.
///
/// Not `Send`: a host lives and dies on the thread that created it.
pub struct BoaHost {
    context: Context,
}

impl BoaHost {
    /// Create an interpreter with `console` installed.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Exception`] if a global cannot be defined.
    pub fn new() -> Result<Self, ScriptError> {
        let mut context = Context::default();
        globals::register_globals(&mut context).map_err(exception)?;
        Ok(Self { context })
    }
}

impl std::fmt::Debug for BoaHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoaHost").finish_non_exhaustive()
    }
}

impl ScriptHost for BoaHost {
    type Native = JsValue;

    fn run(&mut self, source: &str) -> Result<ScriptValue, ScriptError> {
        let value = self
            .context
            .eval(Source::from_bytes(source))
            .map_err(exception)?;
        self.from_native(&value)
    }

    fn register_native_function(&mut self, path: &str, function: NativeFn) -> Result<(), ScriptError> {
        let registration = |reason: &str| ScriptError::Registration {
            path: path.to_string(),
            reason: reason.to_string(),
        };
        let segments: Vec<&str> = path.split('.').collect();
        let Some((name, parents)) = segments.split_last() else {
            return Err(registration("empty path"));
        };
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(registration("empty path segment"));
        }

        let context = &mut self.context;
        let mut target = context.global_object();
        for segment in parents {
            let key = JsString::from(*segment);
            let existing = target.get(key.clone(), context).map_err(exception)?;
            target = if let Some(object) = existing.as_object() {
                object.clone()
            } else if existing.is_undefined() {
                let object = JsObject::with_object_proto(context.intrinsics());
                let _ = target
                    .set(key, object.clone(), true, context)
                    .map_err(exception)?;
                object
            } else {
                return Err(registration(&format!("'{segment}' is not an object")));
            };
        }

        let function = native_function(ScriptFunction(function), name, context);
        let _ = target
            .set(JsString::from(*name), function, true, context)
            .map_err(exception)?;
        Ok(())
    }

    fn to_native(&mut self, value: &ScriptValue) -> Result<JsValue, ScriptError> {
        to_js(value, &mut self.context).map_err(exception)
    }

    fn from_native(&mut self, value: &JsValue) -> Result<ScriptValue, ScriptError> {
        from_js(value, &mut self.context, 0).map_err(exception)
    }
}

#[allow(clippy::needless_pass_by_value)]
fn exception(error: JsError) -> ScriptError {
    ScriptError::Exception(error.to_string())
}

// The `Trace` derive expands to an `unsafe impl`.
#[allow(unsafe_code)]
mod captured {
    use boa_gc::{Finalize, Trace};

    use crate::value::ScriptFunction;

    /// Native closure state. The function is plain Rust data with nothing
    /// for the collector to trace.
    #[derive(Clone, Trace, Finalize)]
    pub(super) struct Captured {
        #[unsafe_ignore_trace]
        pub(super) function: ScriptFunction,
    }
}

fn native_function(function: ScriptFunction, name: &str, context: &mut Context) -> JsFunction {
    let native = NativeFunction::from_copy_closure_with_captures(
        |_this: &JsValue, args: &[JsValue], captured: &Captured, context: &mut Context| {
            let args = args
                .iter()
                .map(|arg| from_js(arg, context, 0))
                .collect::<JsResult<Vec<_>>>()?;
            let result = captured
                .function
                .call(&args)
                .map_err(|error| JsError::from(JsNativeError::error().with_message(error.to_string())))?;
            to_js(&result, context)
        },
        Captured { function },
    );
    FunctionObjectBuilder::new(context.realm(), native)
        .name(JsString::from(name))
        .length(0)
        .build()
}

fn to_js(value: &ScriptValue, context: &mut Context) -> JsResult<JsValue> {
    Ok(match value {
        ScriptValue::Nil => JsValue::null(),
        ScriptValue::Bool(b) => JsValue::from(*b),
        ScriptValue::Number(n) => JsValue::from(*n),
        ScriptValue::String(s) => JsValue::from(JsString::from(s.as_str())),
        ScriptValue::List(items) => {
            let array = JsArray::new(context);
            for item in items {
                let item = to_js(item, context)?;
                let _ = array.push(item, context)?;
            }
            array.into()
        }
        ScriptValue::Table(entries) => {
            let object = JsObject::with_object_proto(context.intrinsics());
            for (key, item) in entries {
                let item = to_js(item, context)?;
                let _ = object.set(JsString::from(key.as_str()), item, true, context)?;
            }
            object.into()
        }
        ScriptValue::Function(function) => native_function(function.clone(), "", context).into(),
    })
}

fn from_js(value: &JsValue, context: &mut Context, depth: usize) -> JsResult<ScriptValue> {
    if value.is_null_or_undefined() {
        return Ok(ScriptValue::Nil);
    }
    if let Some(b) = value.as_boolean() {
        return Ok(ScriptValue::Bool(b));
    }
    if let Some(n) = value.as_number() {
        return Ok(ScriptValue::Number(n));
    }
    if let Some(s) = value.as_string() {
        return Ok(ScriptValue::String(s.to_std_string_escaped()));
    }
    // Functions have no script-value form outside of natives; symbols and
    // bigints have none at all.
    let Some(object) = value.as_object() else {
        return Ok(ScriptValue::Nil);
    };
    if object.is_callable() || depth >= MAX_DEPTH {
        return Ok(ScriptValue::Nil);
    }

    if object.is_array() {
        let mut items = Vec::new();
        for item in array_items(object, context)? {
            items.push(from_js(&item, context, depth + 1)?);
        }
        return Ok(ScriptValue::List(items));
    }

    let mut entries = Vec::new();
    for key in enumerable_keys(object, context)? {
        let item = object.get(key.clone(), context)?;
        entries.push((key.to_std_string_escaped(), from_js(&item, context, depth + 1)?));
    }
    Ok(ScriptValue::Table(entries))
}

fn array_items(object: &JsObject, context: &mut Context) -> JsResult<Vec<JsValue>> {
    let length = object.get(js_string!("length"), context)?.to_length(context)?;
    let mut items = Vec::new();
    for index in 0..length {
        let index = u32::try_from(index)
            .map_err(|_| JsNativeError::range().with_message("array too long"))?;
        items.push(object.get(index, context)?);
    }
    Ok(items)
}

/// Own enumerable string keys in property order, as `Object.keys` sees them.
fn enumerable_keys(object: &JsObject, context: &mut Context) -> JsResult<Vec<JsString>> {
    let keys = context
        .intrinsics()
        .constructors()
        .object()
        .constructor()
        .get(js_string!("keys"), context)?;
    let Some(keys) = keys.as_callable() else {
        return Ok(Vec::new());
    };
    let keys = keys.call(&JsValue::undefined(), &[object.clone().into()], context)?;
    let Some(keys) = keys.as_object() else {
        return Ok(Vec::new());
    };
    Ok(array_items(keys, context)?
        .iter()
        .filter_map(|key| key.as_string().cloned())
        .collect())
}
