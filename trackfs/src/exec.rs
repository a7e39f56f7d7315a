//! 把文件数据当作函数调用
//!
//! 入口遵循 C 调用约定 `int main(int argc, char **argv)`，`argv` 以空指针结尾。

use alloc::{ffi::CString, vec::Vec};
use core::{
    ffi::{c_char, c_int},
    iter, mem, ptr,
};

pub type EntryPoint = unsafe extern "C" fn(argc: c_int, argv: *const *const c_char) -> c_int;

/// 以 \0 结尾的参数字符串及指向它们的指针表
#[derive(Debug)]
pub struct Argv {
    strings: Vec<CString>,
    pointers: Vec<*const c_char>,
}

impl Argv {
    /// `argv[0]` 是程序名，参数中含 \0 时返回 `None`
    pub fn new(program: &str, args: &[&str]) -> Option<Self> {
        let strings = iter::once(program)
            .chain(args.iter().copied())
            .map(|arg| CString::new(arg).ok())
            .collect::<Option<Vec<_>>>()?;
        // CString 的内容在堆上，移动 Vec 不会使指针失效
        let pointers = strings
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(iter::once(ptr::null()))
            .collect();
        Some(Self { strings, pointers })
    }

    pub fn argc(&self) -> c_int {
        self.strings.len() as c_int
    }

    pub fn as_ptr(&self) -> *const *const c_char {
        self.pointers.as_ptr()
    }
}

/// 跳到 `code` 的第一个字节执行
///
/// # Safety
///
/// `code` 必须以一个 [`EntryPoint`] 签名的、在当前体系结构上可执行的函数开头，
/// 所在内存可执行，且该函数在返回前只访问它自己的数据与 `argv`。
pub unsafe fn invoke(code: &[u8], argv: &Argv) -> i32 {
    let entry = unsafe { mem::transmute::<*const u8, EntryPoint>(code.as_ptr()) };
    unsafe { entry(argv.argc(), argv.as_ptr()) }
}
