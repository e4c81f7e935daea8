//! USART register bit layouts
//!
//! Field positions follow the MIK32 reference manual. Interrupt, DMA, LIN
//! and half-duplex fields are listed for completeness; the driver leaves
//! them at their reset value.

use tock_registers::register_bitfields;

register_bitfields![u32,
    pub CONTROL1 [
        /// USART enable
        UE OFFSET(0) NUMBITS(1) [],
        /// Receiver enable
        RE OFFSET(2) NUMBITS(1) [],
        /// Transmitter enable
        TE OFFSET(3) NUMBITS(1) [],
        /// IDLE interrupt enable
        IDLEIE OFFSET(4) NUMBITS(1) [],
        /// RXNE interrupt enable
        RXNEIE OFFSET(5) NUMBITS(1) [],
        /// Transmission complete interrupt enable
        TCIE OFFSET(6) NUMBITS(1) [],
        /// TXE interrupt enable
        TXEIE OFFSET(7) NUMBITS(1) [],
        /// Parity error interrupt enable
        PEIE OFFSET(8) NUMBITS(1) [],
        /// Parity select (0 = even, 1 = odd)
        PS OFFSET(9) NUMBITS(1) [],
        /// Parity control enable
        PCE OFFSET(10) NUMBITS(1) [],
        /// Frame length, bit 0
        M0 OFFSET(12) NUMBITS(1) [],
        /// Frame length, bit 1
        M1 OFFSET(28) NUMBITS(1) []
    ],

    pub CONTROL2 [
        /// LIN break detection interrupt enable
        LBDIE OFFSET(6) NUMBITS(1) [],
        /// Last bit clock pulse
        LBCL OFFSET(8) NUMBITS(1) [],
        /// Clock phase
        CPHA OFFSET(9) NUMBITS(1) [],
        /// Clock polarity
        OCPL OFFSET(10) NUMBITS(1) [],
        /// Clock enable
        CLKEN OFFSET(11) NUMBITS(1) [],
        /// Two stop bits
        STOP OFFSET(13) NUMBITS(1) [],
        /// LIN mode enable
        LBM OFFSET(14) NUMBITS(1) [],
        /// Swap TX/RX pins
        SWAP OFFSET(15) NUMBITS(1) [],
        /// RX pin active level inversion
        RXINV OFFSET(16) NUMBITS(1) [],
        /// TX pin active level inversion
        TXINV OFFSET(17) NUMBITS(1) [],
        /// Binary data inversion
        DATAINV OFFSET(18) NUMBITS(1) [],
        /// Most significant bit first
        MSBFIRST OFFSET(19) NUMBITS(1) []
    ],

    pub CONTROL3 [
        /// Error interrupt enable
        EIE OFFSET(0) NUMBITS(1) [],
        /// Send break request
        SBKRQ OFFSET(2) NUMBITS(1) [],
        /// Half-duplex selection
        HDSEL OFFSET(3) NUMBITS(1) [],
        /// DMA enable receiver
        DMAR OFFSET(6) NUMBITS(1) [],
        /// DMA enable transmitter
        DMAT OFFSET(7) NUMBITS(1) [],
        /// RTS enable
        RTSE OFFSET(8) NUMBITS(1) [],
        /// CTS enable
        CTSE OFFSET(9) NUMBITS(1) [],
        /// CTS interrupt enable
        CTSIE OFFSET(10) NUMBITS(1) [],
        /// Overrun disable
        OVRDIS OFFSET(12) NUMBITS(1) []
    ],

    pub FLAGS [
        /// Parity error
        PE OFFSET(0) NUMBITS(1) [],
        /// Framing error
        FE OFFSET(1) NUMBITS(1) [],
        /// Noise detected
        NF OFFSET(2) NUMBITS(1) [],
        /// Overrun error
        ORE OFFSET(3) NUMBITS(1) [],
        /// Idle line detected
        IDLE OFFSET(4) NUMBITS(1) [],
        /// Read data register not empty
        RXNE OFFSET(5) NUMBITS(1) [],
        /// Transmission complete
        TC OFFSET(6) NUMBITS(1) [],
        /// Transmit data register empty
        TXE OFFSET(7) NUMBITS(1) [],
        /// LIN break detection flag
        LBDF OFFSET(8) NUMBITS(1) [],
        /// CTS interrupt flag
        CTSIF OFFSET(9) NUMBITS(1) [],
        /// CTS line level
        CTS OFFSET(10) NUMBITS(1) [],
        /// Receiver busy
        BUSY OFFSET(16) NUMBITS(1) [],
        /// Transmitter enable acknowledge
        TEACK OFFSET(21) NUMBITS(1) [],
        /// Receiver enable acknowledge
        REACK OFFSET(22) NUMBITS(1) []
    ],

    pub MODEM [
        /// DSR change interrupt flag
        DSRIF OFFSET(1) NUMBITS(1) [],
        /// Ring indicator change interrupt flag
        RIIF OFFSET(2) NUMBITS(1) [],
        /// DCD change interrupt flag
        DCDIF OFFSET(3) NUMBITS(1) [],
        /// Data set ready input
        DSR OFFSET(5) NUMBITS(1) [],
        /// Ring indicator input
        RI OFFSET(6) NUMBITS(1) [],
        /// Data carrier detect input
        DCD OFFSET(7) NUMBITS(1) [],
        /// Data terminal ready output
        DTR OFFSET(8) NUMBITS(1) []
    ]
];
