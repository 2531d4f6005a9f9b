//! Runtime checks on the generated bindings.

use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::ffi::{c_void, CStr};
use std::hash::{Hash, Hasher};
use std::mem::{align_of, size_of};
use std::ptr;

use bindings_smoke::vk::*;
use pretty_assertions::assert_eq;

// === Constants ===

#[test]
fn constants_keep_their_values() {
    assert_eq!(VK_TRUE, 1);
    assert_eq!(VK_FALSE, 0);
    assert_eq!(VK_MAX_DESCRIPTION_SIZE, 256);
    assert_eq!(VK_REMAINING_MIP_LEVELS, u32::MAX);
    assert_eq!(VK_QUEUE_FAMILY_EXTERNAL, u32::MAX - 1);
    assert_eq!(VK_WHOLE_SIZE, u64::MAX);
    assert!((VK_LOD_CLAMP_NONE - 1000.0).abs() < f32::EPSILON);
    assert!((VK_HALF - 2.0).abs() < f64::EPSILON);
    assert_eq!(VK_KHR_SURFACE_EXTENSION_NAME, "VK_KHR_surface");
}

#[test]
fn constant_alias_is_the_same_value() {
    assert_eq!(VK_TRUE_KHR, VK_TRUE);
}

// === Enums ===

#[test]
fn enum_members_carry_registry_values() {
    assert_eq!(VkResult::VK_SUCCESS.0, 0);
    assert_eq!(VkResult::VK_NOT_READY.0, 1);
    assert_eq!(VkResult::VK_ERROR_OUT_OF_HOST_MEMORY.0, -1);
    assert_eq!(VkResult::VK_RESULT_MAX_ENUM.0, i32::MAX);
    assert_eq!(VkResult::default(), VkResult::VK_SUCCESS);
    assert_eq!(size_of::<VkResult>(), size_of::<i32>());
}

#[test]
fn enums_accept_unlisted_values() {
    // Drivers may return values newer than the registry.
    let unknown = VkResult(-1_000_001_000);
    assert_ne!(unknown, VkResult::VK_SUCCESS);
}

#[test]
fn empty_enumerations_have_a_none_member() {
    assert_eq!(VkReserved::None.0, 0);
    assert_eq!(VkReservedFlagBits::None.bits(), 0);
}

#[test]
fn bitmasks_combine() {
    let both = VkCullModeFlagBits::VK_CULL_MODE_FRONT_BIT | VkCullModeFlagBits::VK_CULL_MODE_BACK_BIT;
    assert_eq!(both, VkCullModeFlagBits::VK_CULL_MODE_FRONT_AND_BACK);
    assert_eq!(both.bits(), 3);
    assert!(both.contains(VkCullModeFlagBits::VK_CULL_MODE_BACK_BIT));
    assert!(VkCullModeFlagBits::empty().is_empty());
    assert_eq!(size_of::<VkCullModeFlagBits>(), size_of::<u32>());
}

#[test]
fn wide_bitmasks_use_64_bits() {
    let read = VkAccessFlagBits2::VK_ACCESS_2_SHADER_SAMPLED_READ_BIT;
    assert_eq!(read.bits(), 1 << 32);
    assert_eq!(size_of::<VkAccessFlagBits2>(), size_of::<u64>());
}

// === Structs and unions ===

#[test]
fn struct_arrays_are_flattened_without_changing_layout() {
    let limits = VkPhysicalDeviceLimits {
        maxImageDimension1D: 4096,
        maxComputeWorkGroupCount_0: 65535,
        maxComputeWorkGroupCount_1: 65535,
        maxComputeWorkGroupCount_2: 64,
    };
    assert_eq!(limits.maxComputeWorkGroupCount_2, 64);
    assert_eq!(size_of::<VkPhysicalDeviceLimits>(), 4 * size_of::<u32>());
}

#[test]
fn struct_members_use_projected_types() {
    let state = VkRenderState {
        pNext: ptr::null(),
        type_: VkResult::VK_NOT_READY,
        cullMode: 2,
        extent: VkExtent2D {
            width: 640,
            height: 480,
        },
        buffer: VkBuffer::NULL,
        pfnCallback: None,
    };
    let copy = state;
    assert_eq!(copy.type_, VkResult::VK_NOT_READY);
    assert_eq!(copy.extent.width * copy.extent.height, 307_200);
    assert!(copy.buffer.is_null());
}

#[test]
fn union_members_overlap() {
    let value = VkClearColorValue {
        uint32: [0x3f80_0000; 4],
    };
    // SAFETY: every member is plain data of the same size.
    let floats = unsafe { value.float32 };
    assert_eq!(floats, [1.0; 4]);
    assert_eq!(size_of::<VkClearColorValue>(), 4 * size_of::<u32>());
    assert_eq!(align_of::<VkClearColorValue>(), align_of::<u32>());
}

#[test]
fn union_members_start_at_offset_zero() {
    let value = VkClearColorValue { int32: [0; 4] };
    let base = ptr::addr_of!(value) as usize;
    // SAFETY: only field addresses are taken; nothing is read.
    let offsets = unsafe {
        [
            ptr::addr_of!(value.float32) as usize - base,
            ptr::addr_of!(value.int32) as usize - base,
            ptr::addr_of!(value.uint32) as usize - base,
        ]
    };
    assert_eq!(offsets, [0, 0, 0]);
}

// === Handles ===

#[test]
fn handles_have_a_null_value() {
    assert!(VkInstance::NULL.is_null());
    assert!(VkBuffer::NULL.is_null());
    assert_eq!(VkInstance::default(), VkInstance::NULL);
    assert_eq!(VkBuffer::default(), VkBuffer::NULL);
    assert_eq!(VkBuffer::from(0u64), VkBuffer::NULL);
    assert_ne!(VkBuffer::from(1u64), VkBuffer::NULL);
    assert_eq!(VkInstance::from(ptr::null_mut::<c_void>()), VkInstance::NULL);
}

#[test]
fn handles_compare_with_their_raw_value() {
    let buffer = VkBuffer::from(0xdead_beef_u64);
    assert!(!buffer.is_null());
    assert_eq!(buffer, 0xdead_beef_u64);
    assert_eq!(VkInstance::NULL, ptr::null_mut::<c_void>());
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn handles_hash_like_their_raw_value() {
    assert_eq!(hash_of(&VkBuffer(7)), hash_of(&7u64));
    assert_eq!(hash_of(&VkBuffer::from(7u64)), hash_of(&VkBuffer(7)));
    assert_ne!(hash_of(&VkBuffer(7)), hash_of(&VkBuffer(8)));
    assert_eq!(hash_of(&VkInstance::NULL), hash_of(&ptr::null_mut::<c_void>()));
}

#[test]
fn handle_storage_matches_dispatchability() {
    assert_eq!(size_of::<VkInstance>(), size_of::<*mut c_void>());
    assert_eq!(size_of::<VkBuffer>(), size_of::<u64>());
}

// === Commands ===

extern "system" fn add_numbers(a: u32, b: u32) -> u32 {
    a + b
}

extern "system" fn get_buffer_size(buffer: VkBuffer, size: *mut u64) {
    // SAFETY: callers pass a valid out pointer.
    unsafe { *size = buffer.0 * 2 };
}

extern "system" fn is_instance_null(instance: VkInstance) -> u32 {
    u32::from(instance.is_null())
}

extern "system" fn set_kind(kind: VkResult, state: *mut VkRenderState) -> VkResult {
    // SAFETY: callers pass a valid state pointer.
    unsafe { (*state).type_ = kind };
    VkResult::VK_SUCCESS
}

fn loader(name: &CStr) -> *const c_void {
    match name.to_bytes() {
        b"vkAddNumbers" => add_numbers as *const c_void,
        b"vkGetBufferSize" => get_buffer_size as *const c_void,
        b"vkIsInstanceNull" => is_instance_null as *const c_void,
        b"vkSetKind" => set_kind as *const c_void,
        _ => ptr::null(),
    }
}

#[test]
fn loaded_commands_forward_their_arguments() {
    // SAFETY: every address `loader` returns has the registry's signature.
    let commands = unsafe { Commands::load(loader) };

    // SAFETY: the bound functions have no preconditions beyond valid pointers.
    unsafe {
        assert_eq!(commands.vkAddNumbers(2, 3), 5);

        let mut size = 0u64;
        commands.vkGetBufferSize(VkBuffer(21), &mut size);
        assert_eq!(size, 42);

        assert_eq!(commands.vkIsInstanceNull(VkInstance::NULL), VK_TRUE);
    }
}

#[test]
fn keyword_parameters_forward_positionally() {
    // SAFETY: see `loader`.
    let commands = unsafe { Commands::load(loader) };
    let mut state = VkRenderState {
        pNext: ptr::null(),
        type_: VkResult::VK_SUCCESS,
        cullMode: 0,
        extent: VkExtent2D {
            width: 0,
            height: 0,
        },
        buffer: VkBuffer::NULL,
        pfnCallback: None,
    };
    // SAFETY: `state` outlives the call.
    let result = unsafe { commands.vkSetKind(VkResult::VK_NOT_READY, &mut state) };
    assert_eq!(result, VkResult::VK_SUCCESS);
    assert_eq!(state.type_, VkResult::VK_NOT_READY);
}

#[test]
fn loader_is_asked_for_every_unaliased_command_once() {
    let asked = RefCell::new(Vec::new());
    // SAFETY: the loader never returns an address.
    let _ = unsafe {
        Commands::load(|name: &CStr| {
            asked
                .borrow_mut()
                .push(name.to_str().unwrap_or_default().to_string());
            ptr::null()
        })
    };
    assert_eq!(
        asked.into_inner(),
        ["vkAddNumbers", "vkGetBufferSize", "vkIsInstanceNull", "vkSetKind"]
    );
}

#[test]
#[should_panic(expected = "vkAddNumbers is not bound")]
fn unbound_commands_panic() {
    let commands = Commands::default();
    // SAFETY: the call panics before reaching native code.
    unsafe {
        commands.vkAddNumbers(1, 2);
    }
}

#[test]
#[should_panic(expected = "vkGetBufferSize is not bound")]
fn null_addresses_leave_slots_unbound() {
    // SAFETY: see `loader`.
    let commands = unsafe {
        Commands::load(|name: &CStr| {
            if name.to_bytes() == b"vkAddNumbers" {
                loader(name)
            } else {
                ptr::null()
            }
        })
    };
    // SAFETY: bound to `add_numbers`.
    assert_eq!(unsafe { commands.vkAddNumbers(40, 2) }, 42);
    let mut size = 0u64;
    // SAFETY: the call panics before reaching native code.
    unsafe { commands.vkGetBufferSize(VkBuffer(1), &mut size) };
}
