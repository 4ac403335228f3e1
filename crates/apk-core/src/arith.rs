//! Wide-integer kernel
//!
//! Add-with-carry and subtract-with-borrow over u64 limbs, plus the 256-bit
//! word chains built on them. All arithmetic wraps; the overflow bit is the
//! explicit output.

use core::cmp::Ordering;

use crate::types::Word;

/// `x + y + carry`, returning `(carry_out, sum)`.
#[inline]
pub const fn add_with_carry(x: u64, y: u64, carry: bool) -> (bool, u64) {
    let (sum1, c1) = x.overflowing_add(y);
    let (sum2, c2) = sum1.overflowing_add(carry as u64);
    (c1 | c2, sum2)
}

/// `x - y - borrow`, returning `(borrow_out, diff)`.
#[inline]
pub const fn sub_with_borrow(x: u64, y: u64, borrow: bool) -> (bool, u64) {
    let (diff1, b1) = x.overflowing_sub(y);
    let (diff2, b2) = diff1.overflowing_sub(borrow as u64);
    (b1 | b2, diff2)
}

/// Chained 256-bit add.
#[inline]
pub fn add_words(a: &Word, b: &Word, carry: bool) -> (bool, Word) {
    let mut result = [0u64; 4];
    let mut carry = carry;
    for i in 0..4 {
        let (c, s) = add_with_carry(a[i], b[i], carry);
        result[i] = s;
        carry = c;
    }
    (carry, result)
}

/// Chained 256-bit subtract.
#[inline]
pub fn sub_words(a: &Word, b: &Word, borrow: bool) -> (bool, Word) {
    let mut result = [0u64; 4];
    let mut borrow = borrow;
    for i in 0..4 {
        let (b_out, d) = sub_with_borrow(a[i], b[i], borrow);
        result[i] = d;
        borrow = b_out;
    }
    (borrow, result)
}

/// Compare two words as unsigned 256-bit integers.
#[inline]
pub fn cmp_words(a: &Word, b: &Word) -> Ordering {
    for i in (0..4).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Logical right shift by one bit across a chain of words, most significant
/// word first. The low bit of each word moves into the top of the next.
pub fn shr1_words(words: &mut [Word]) {
    let mut carry = 0u64;
    for word in words.iter_mut() {
        for i in (0..4).rev() {
            let next = word[i] & 1;
            word[i] = (word[i] >> 1) | (carry << 63);
            carry = next;
        }
    }
}

/// Serialize a word as 32 big-endian bytes.
#[inline]
pub fn word_to_be_bytes(word: &Word) -> [u8; 32] {
    let mut out = [0u8; 32];
    for i in 0..4 {
        out[(3 - i) * 8..(4 - i) * 8].copy_from_slice(&word[i].to_be_bytes());
    }
    out
}

/// Parse 32 big-endian bytes into a word.
#[inline]
pub fn word_from_be_bytes(bytes: &[u8; 32]) -> Word {
    let mut word = [0u64; 4];
    for i in 0..4 {
        let mut limb = [0u8; 8];
        limb.copy_from_slice(&bytes[(3 - i) * 8..(4 - i) * 8]);
        word[i] = u64::from_be_bytes(limb);
    }
    word
}
